//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use common::pagination::Capacity;

#[cfg(doc)]
use infra::{Cache, Database};

pub use self::query::Query;

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// [TTL] of cached [`read::house::list::Page`]s.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    pub house_list_ttl: Duration,

    /// [TTL] of cached [`read::house::detail::Info`]s.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    pub house_detail_ttl: Duration,

    /// [TTL] of the cached [`read::area::Info`] list.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    pub area_info_ttl: Duration,

    /// [TTL] of the cached home page houses.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    pub home_page_ttl: Duration,

    /// Number of houses per [`read::house::list::Page`].
    pub house_list_page_capacity: Capacity,

    /// Maximum number of houses on the home page.
    pub home_page_max_houses: u32,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Ch> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Cache`] of this [`Service`].
    cache: Ch,
}

impl<Db, Ch> Service<Db, Ch> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, database: Db, cache: Ch) -> Self {
        Self { config, database, cache }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub const fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Cache`] of this [`Service`].
    #[must_use]
    pub const fn cache(&self) -> &Ch {
        &self.cache
    }
}
