//! Definitions of rental orders (bookings) of [`house`]s.
//!
//! [`house`]: super::house

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID of a rental order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Status of a rental order."]
    enum Status {
        #[doc = "Waiting for the landlord to accept."]
        WaitAccept = 1,

        #[doc = "Accepted, waiting for the payment."]
        WaitPayment = 2,

        #[doc = "Paid, rental not finished yet."]
        Paid = 3,

        #[doc = "Rental finished, waiting for a comment."]
        WaitComment = 4,

        #[doc = "Completed and commented."]
        Complete = 5,

        #[doc = "Canceled by the tenant."]
        Canceled = 6,

        #[doc = "Rejected by the landlord."]
        Rejected = 7,
    }
}
