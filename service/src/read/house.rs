//! [`House`]-related read definitions.

#[cfg(doc)]
use crate::domain::House;

pub mod list {
    //! [`House`] list definitions.

    use common::{
        pagination::{Capacity, PageNumber, TotalPages},
        Money,
    };
    use serde::Serialize;
    use strum::{Display, EnumString};

    use crate::domain::{area, house};
    #[cfg(doc)]
    use crate::domain::House;

    /// Key a [`House`] list is sorted by.
    #[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
    pub enum SortKey {
        /// Most recently listed first.
        #[default]
        #[strum(serialize = "new")]
        New,

        /// Most booked first.
        #[strum(serialize = "booking")]
        Booking,

        /// Cheapest first.
        #[strum(serialize = "price-asc")]
        PriceAsc,

        /// Most expensive first.
        #[strum(serialize = "price-desc")]
        PriceDesc,
    }

    impl SortKey {
        /// Parses a [`SortKey`] out of the given request parameter.
        ///
        /// Unrecognized values fall back to [`SortKey::New`] rather than
        /// erroring.
        #[must_use]
        pub fn from_param(s: &str) -> Self {
            s.parse().unwrap_or_default()
        }

        /// Returns the `ORDER BY` clause expressing this [`SortKey`].
        #[cfg(feature = "postgres")]
        #[must_use]
        pub(crate) const fn sql(self) -> &'static str {
            match self {
                Self::New => "created_at DESC",
                Self::Booking => "order_count DESC",
                Self::PriceAsc => "price ASC",
                Self::PriceDesc => "price DESC",
            }
        }
    }

    /// Selector of a [`Page`] of [`House`]s.
    #[derive(Clone, Debug)]
    pub struct Selector {
        /// [`area`] to list [`House`]s of, if any.
        pub area: Option<area::Id>,

        /// [`House`]s to exclude from the listing.
        pub excluded: Vec<house::Id>,

        /// [`SortKey`] to order the listing by.
        pub sort: SortKey,

        /// Number of the requested [`Page`].
        pub page: PageNumber,

        /// Maximum number of [`House`]s per [`Page`].
        pub capacity: Capacity,
    }

    /// [`House`] as it appears in a listing.
    #[derive(Clone, Debug, Serialize)]
    pub struct Summary {
        /// ID of the [`House`].
        pub house_id: house::Id,

        /// Title of the [`House`].
        pub title: house::Title,

        /// Price of the [`House`] per night, in minor currency units.
        pub price: Money,

        /// Name of the area the [`House`] is located in.
        pub area_name: area::Name,

        /// URL of the cover image, or an empty string if none is uploaded.
        pub img_url: String,

        /// Number of rooms in the [`House`].
        pub room_count: house::RoomCount,

        /// Number of completed orders of the [`House`].
        pub order_count: house::OrderCount,

        /// Address of the [`House`].
        pub address: house::Address,

        /// Date the [`House`] was listed, formatted as `YYYY-MM-DD`.
        pub ctime: String,
    }

    /// Single page of a [`House`] listing.
    #[derive(Clone, Debug, Serialize)]
    pub struct Page {
        /// [`House`]s of this [`Page`].
        pub houses: Vec<Summary>,

        /// Total number of [`Page`]s the listing consists of.
        #[serde(rename = "total_page")]
        pub total: TotalPages,

        /// Number of this [`Page`].
        #[serde(rename = "current_page")]
        pub current: PageNumber,
    }

}

pub mod detail {
    //! Single [`House`] view definitions.

    use common::Money;
    use serde::Serialize;

    use crate::domain::{facility, house, user, House};

    /// Full view of a single [`House`].
    #[derive(Clone, Debug, Serialize)]
    pub struct Info {
        /// ID of the [`House`].
        pub hid: house::Id,

        /// ID of the [`user`] owning the [`House`].
        pub user_id: user::Id,

        /// Title of the [`House`].
        pub title: house::Title,

        /// Price of the [`House`] per night, in minor currency units.
        pub price: Money,

        /// Address of the [`House`].
        pub address: house::Address,

        /// Number of rooms in the [`House`].
        pub room_count: house::RoomCount,

        /// Acreage of the [`House`], in square meters.
        pub acreage: house::Acreage,

        /// Unit description of the [`House`].
        pub unit: house::Unit,

        /// Maximum number of guests the [`House`] can host.
        pub capacity: house::Capacity,

        /// Beds description of the [`House`].
        pub beds: house::Beds,

        /// Deposit required to rent the [`House`], in minor currency units.
        pub deposit: Money,

        /// Minimum number of days a rental must last.
        pub min_days: house::Days,

        /// Maximum number of days a rental may last, `0` meaning no limit.
        pub max_days: house::Days,

        /// Number of completed orders of the [`House`].
        pub order_count: house::OrderCount,

        /// URL of the cover image, or an empty string if none is uploaded.
        pub img_url: String,

        /// IDs of the facilities the [`House`] provides.
        pub facilities: Vec<facility::Id>,

        /// Date the [`House`] was listed, formatted as `YYYY-MM-DD`.
        pub ctime: String,
    }

    impl From<(House, Vec<facility::Id>)> for Info {
        fn from((house, facilities): (House, Vec<facility::Id>)) -> Self {
            Self {
                hid: house.id,
                user_id: house.user_id,
                title: house.title,
                price: house.price,
                address: house.address,
                room_count: house.room_count,
                acreage: house.acreage,
                unit: house.unit,
                capacity: house.capacity,
                beds: house.beds,
                deposit: house.deposit,
                min_days: house.min_days,
                max_days: house.max_days,
                order_count: house.order_count,
                img_url: house
                    .index_image
                    .map(Into::into)
                    .unwrap_or_default(),
                facilities,
                ctime: house.created_at.to_date_string(),
            }
        }
    }
}

pub mod home {
    //! Home page [`House`] definitions.

    #[cfg(doc)]
    use crate::domain::House;

    /// Selector of the home page [`House`]s.
    #[derive(Clone, Copy, Debug)]
    pub struct Selector {
        /// Maximum number of [`House`]s to select.
        pub limit: u32,
    }
}
