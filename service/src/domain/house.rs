//! [`House`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{area, user};

/// House listed for rent.
#[derive(Clone, Debug)]
pub struct House {
    /// ID of this [`House`].
    pub id: Id,

    /// ID of the [`user`] owning this [`House`].
    pub user_id: user::Id,

    /// ID of the [`area`] this [`House`] is located in.
    pub area_id: area::Id,

    /// [`Title`] of this [`House`].
    pub title: Title,

    /// Price of this [`House`] per night.
    pub price: Money,

    /// [`Address`] of this [`House`].
    pub address: Address,

    /// Number of rooms in this [`House`].
    pub room_count: RoomCount,

    /// Total acreage of this [`House`], in square meters.
    pub acreage: Acreage,

    /// [`Unit`] description of this [`House`].
    pub unit: Unit,

    /// Maximum number of guests this [`House`] can host.
    pub capacity: Capacity,

    /// [`Beds`] description of this [`House`].
    pub beds: Beds,

    /// Deposit required to rent this [`House`].
    pub deposit: Money,

    /// Minimum number of days a rental must last.
    pub min_days: Days,

    /// Maximum number of days a rental may last, `0` meaning no limit.
    pub max_days: Days,

    /// Cover image of this [`House`], if uploaded.
    pub index_image: Option<ImageUrl>,

    /// Number of completed orders of this [`House`].
    pub order_count: OrderCount,

    /// [`DateTime`] when this [`House`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`House`].
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

/// Title of a [`House`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Title(String);

/// Full address of a [`House`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Address(String);

/// Unit description of a [`House`] (e.g. "2 bedrooms, 1 living room").
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Unit(String);

/// Beds description of a [`House`] (e.g. "double bed 2m x 1.8m").
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
#[from(forward)]
pub struct Beds(String);

/// URL of a [`House`] image.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, Into, PartialEq, Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct ImageUrl(String);

/// Number of rooms in a [`House`].
pub type RoomCount = u16;

/// Acreage of a [`House`], in square meters.
pub type Acreage = u32;

/// Maximum number of guests a [`House`] can host.
pub type Capacity = u16;

/// Number of days constraining a rental of a [`House`].
pub type Days = u16;

/// Number of completed orders of a [`House`].
pub type OrderCount = u32;

/// [`DateTime`] when a [`House`] was created.
pub type CreationDateTime = DateTimeOf<(House, unit::Creation)>;
