//! [`Area`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// City area (district) houses are grouped by.
#[derive(Clone, Debug)]
pub struct Area {
    /// ID of this [`Area`].
    pub id: Id,

    /// [`Name`] of this [`Area`].
    pub name: Name,
}

/// ID of an [`Area`].
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

/// Name of an [`Area`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Name(String);
