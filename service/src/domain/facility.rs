//! Definitions of facilities a house may provide (e.g. Wi-Fi, heating).

use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

/// ID of a facility.
///
/// Facilities form a fixed catalog, so their IDs are plain ordinals rather
/// than [UUID]s.
///
/// [UUID]: https://en.wikipedia.org/wiki/Universally_unique_identifier
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);
