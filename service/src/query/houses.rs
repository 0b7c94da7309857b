//! [`Query`] collection related to the multiple [`House`]s.

use common::{
    operations::{By, Select},
    pagination::PageNumber,
    DateRange,
};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::House;
use crate::{
    domain::area,
    infra::{cache, database, Cache, Database},
    read, Query, Service,
};

use super::Payload;

/// Raw, unvalidated parameters of a [`Search`], as they appear in a request
/// query string.
///
/// Absent and empty parameters are both represented as [`None`].
#[derive(Clone, Debug, Default)]
pub struct RawParams {
    /// Requested area ID.
    pub area: Option<String>,

    /// Requested first day of the rental.
    pub start_date: Option<String>,

    /// Requested last day of the rental.
    pub end_date: Option<String>,

    /// Requested sort key.
    pub sort: Option<String>,
}

impl RawParams {
    /// Returns the [`cache::Key`] the result pages of a [`Search`] with these
    /// parameters are stored under.
    ///
    /// The key is built from the raw values, so two textually different
    /// spellings of the same search are cached independently.
    #[must_use]
    pub fn cache_key(&self) -> cache::Key {
        format!(
            "houses_{}_{}_{}_{}",
            self.area.as_deref().unwrap_or(""),
            self.start_date.as_deref().unwrap_or(""),
            self.end_date.as_deref().unwrap_or(""),
            self.sort.as_deref().unwrap_or("new"),
        )
        .into()
    }
}

/// [`Query`] searching [`House`]s available for booking.
///
/// Result pages are cached per [`cache::Key`] and page number, and a cache
/// hit is returned byte-for-byte as it was stored.
#[derive(Clone, Debug)]
pub struct Search {
    /// [`cache::Key`] the result pages are cached under.
    pub key: cache::Key,

    /// [`area`] to search [`House`]s in, if any.
    pub area: Option<area::Id>,

    /// Days the rental should span.
    ///
    /// [`House`]s having a booking overlapping these days are omitted from
    /// the results.
    pub dates: DateRange,

    /// [`read::house::list::SortKey`] ordering the results.
    pub sort: read::house::list::SortKey,

    /// Number of the requested page.
    pub page: PageNumber,
}

impl Search {
    /// Creates a new [`Search`] from the provided raw and parsed parameters.
    #[must_use]
    pub fn new(
        raw: &RawParams,
        area: Option<area::Id>,
        dates: DateRange,
        page: PageNumber,
    ) -> Self {
        Self {
            key: raw.cache_key(),
            area,
            dates,
            sort: raw.sort.as_deref().map_or_else(
                read::house::list::SortKey::default,
                read::house::list::SortKey::from_param,
            ),
            page,
        }
    }
}

impl<Db, Ch> Query<Search> for Service<Db, Ch>
where
    Db: Database<
            Select<By<read::order::Conflicts, DateRange>>,
            Ok = read::order::Conflicts,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::house::list::Page, read::house::list::Selector>>,
            Ok = read::house::list::Page,
            Err = Traced<database::Error>,
        >,
    Ch: Cache<cache::ReadField, Ok = Option<String>, Err = Traced<cache::Error>>
        + Cache<cache::WriteField, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Payload;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Search { key, area, dates, sort, page }: Search,
    ) -> Result<Self::Ok, Self::Err> {
        let field = cache::Field::from(page.to_string());

        match self
            .cache()
            .execute(cache::ReadField {
                key: key.clone(),
                field: field.clone(),
            })
            .await
        {
            Ok(Some(cached)) if !cached.is_empty() => {
                log::debug!(
                    key = key.as_str(),
                    page = page.get(),
                    "house list cache hit",
                );
                return Ok(cached.into());
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("house list cache lookup failed: {e}");
            }
        }

        let excluded = if dates.is_empty() {
            vec![]
        } else {
            self.database()
                .execute(Select(By::<read::order::Conflicts, _>::new(dates)))
                .await
                .map_err(tracerr::wrap!())?
                .as_slice()
                .to_vec()
        };

        let result = self
            .database()
            .execute(Select(By::<read::house::list::Page, _>::new(
                read::house::list::Selector {
                    area,
                    excluded,
                    sort,
                    page,
                    capacity: self.config().house_list_page_capacity,
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let payload = Payload::encode(&result);

        // Pages beyond the listing are served but never stored, to keep the
        // hash bounded by the real page count.
        if !page.overflows(result.total) {
            if let Err(e) = self
                .cache()
                .execute(cache::WriteField {
                    key,
                    field,
                    value: payload.as_str().to_owned(),
                    ttl: self.config().house_list_ttl,
                })
                .await
            {
                log::warn!("house list cache population failed: {e}");
            }
        }

        Ok(payload)
    }
}

/// [`Query`] of the most booked [`House`]s shown on the home page.
///
/// Resolves into [`None`] when no suitable [`House`]s exist, and such an
/// outcome is not cached.
#[derive(Clone, Copy, Debug)]
pub struct HomePage;

impl HomePage {
    /// [`cache::Key`] the home page [`House`]s are cached under.
    pub const CACHE_KEY: &'static str = "home_page_data";
}

impl<Db, Ch> Query<HomePage> for Service<Db, Ch>
where
    Db: Database<
        Select<
            By<Vec<read::house::list::Summary>, read::house::home::Selector>,
        >,
        Ok = Vec<read::house::list::Summary>,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<cache::Read, Ok = Option<String>, Err = Traced<cache::Error>>
        + Cache<cache::Write, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Option<Payload>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: HomePage) -> Result<Self::Ok, Self::Err> {
        match self
            .cache()
            .execute(cache::Read(HomePage::CACHE_KEY.into()))
            .await
        {
            Ok(Some(cached)) if !cached.is_empty() => {
                log::debug!("home page cache hit");
                return Ok(Some(cached.into()));
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("home page cache lookup failed: {e}");
            }
        }

        let houses = self
            .database()
            .execute(Select(
                By::<Vec<read::house::list::Summary>, _>::new(
                    read::house::home::Selector {
                        limit: self.config().home_page_max_houses,
                    },
                ),
            ))
            .await
            .map_err(tracerr::wrap!())?;
        if houses.is_empty() {
            return Ok(None);
        }

        let payload = Payload::encode(&houses);

        if let Err(e) = self
            .cache()
            .execute(cache::Write {
                key: HomePage::CACHE_KEY.into(),
                value: payload.as_str().to_owned(),
                ttl: self.config().home_page_ttl,
            })
            .await
        {
            log::warn!("home page cache population failed: {e}");
        }

        Ok(Some(payload))
    }
}

#[cfg(test)]
mod spec {
    use std::{sync::Mutex, time::Duration};

    use common::{
        operations::{By, Select},
        pagination::{Capacity, PageNumber, TotalPages},
        DateRange,
    };
    use tracerr::Traced;

    use crate::{
        domain::{area, house},
        infra::{database, Database},
        query::{testing::FakeCache, Payload},
        read, Config, Query as _, Service,
    };

    use super::{HomePage, RawParams, Search};

    /// Listed house together with the area it belongs to.
    #[derive(Clone, Debug)]
    struct Listed {
        summary: read::house::list::Summary,
        area: area::Id,
    }

    /// In-memory [`Database`] mirroring the listing SQL semantics.
    #[derive(Debug, Default)]
    struct FakeDb {
        listed: Vec<Listed>,
        bookings: Vec<(house::Id, common::Date, common::Date)>,
        searches: Mutex<Vec<read::house::list::Selector>>,
        conflict_lookups: Mutex<Vec<DateRange>>,
    }

    impl Database<Select<By<read::order::Conflicts, DateRange>>> for FakeDb {
        type Ok = read::order::Conflicts;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<read::order::Conflicts, DateRange>>,
        ) -> Result<Self::Ok, Self::Err> {
            let range = by.into_inner();
            self.conflict_lookups.lock().unwrap().push(range);
            Ok(self
                .bookings
                .iter()
                .filter(|(_, begin, end)| range.overlaps(*begin, *end))
                .map(|(id, ..)| *id)
                .collect::<Vec<_>>()
                .into())
        }
    }

    impl
        Database<
            Select<By<read::house::list::Page, read::house::list::Selector>>,
        > for FakeDb
    {
        type Ok = read::house::list::Page;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<
                By<read::house::list::Page, read::house::list::Selector>,
            >,
        ) -> Result<Self::Ok, Self::Err> {
            let selector = by.into_inner();
            self.searches.lock().unwrap().push(selector.clone());

            // Interleaving point for concurrently polled searches.
            tokio::task::yield_now().await;

            let read::house::list::Selector {
                area,
                excluded,
                sort,
                page,
                capacity,
            } = selector;

            let mut rows = self
                .listed
                .iter()
                .filter(|l| area.map_or(true, |a| l.area == a))
                .filter(|l| !excluded.contains(&l.summary.house_id))
                .map(|l| l.summary.clone())
                .collect::<Vec<_>>();
            use read::house::list::SortKey;
            match sort {
                SortKey::New => rows.sort_by(|a, b| b.ctime.cmp(&a.ctime)),
                SortKey::Booking => {
                    rows.sort_by(|a, b| b.order_count.cmp(&a.order_count));
                }
                SortKey::PriceAsc => rows.sort_by(|a, b| a.price.cmp(&b.price)),
                SortKey::PriceDesc => {
                    rows.sort_by(|a, b| b.price.cmp(&a.price));
                }
            }
            let total = TotalPages::of(rows.len() as u64, capacity);
            let houses = rows
                .into_iter()
                .skip(usize::try_from(page.offset(capacity)).unwrap())
                .take(capacity.get() as usize)
                .collect();

            Ok(read::house::list::Page { houses, total, current: page })
        }
    }

    impl
        Database<
            Select<
                By<
                    Vec<read::house::list::Summary>,
                    read::house::home::Selector,
                >,
            >,
        > for FakeDb
    {
        type Ok = Vec<read::house::list::Summary>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<
                By<
                    Vec<read::house::list::Summary>,
                    read::house::home::Selector,
                >,
            >,
        ) -> Result<Self::Ok, Self::Err> {
            let limit = by.into_inner().limit;
            let mut rows = self
                .listed
                .iter()
                .filter(|l| !l.summary.img_url.is_empty())
                .map(|l| l.summary.clone())
                .collect::<Vec<_>>();
            rows.sort_by(|a, b| b.order_count.cmp(&a.order_count));
            rows.truncate(usize::try_from(limit).unwrap());
            Ok(rows)
        }
    }

    fn config() -> Config {
        Config {
            house_list_ttl: Duration::from_secs(7200),
            house_detail_ttl: Duration::from_secs(7200),
            area_info_ttl: Duration::from_secs(7200),
            home_page_ttl: Duration::from_secs(7200),
            house_list_page_capacity: Capacity::new(2).unwrap(),
            home_page_max_houses: 5,
        }
    }

    fn service(db: FakeDb, cache: FakeCache) -> Service<FakeDb, FakeCache> {
        Service::new(config(), db, cache)
    }

    fn listed(
        title: &str,
        area: area::Id,
        price: i64,
        orders: u32,
        day: &str,
    ) -> Listed {
        Listed {
            summary: read::house::list::Summary {
                house_id: house::Id::new(),
                title: title.into(),
                price: price.into(),
                area_name: "Downtown".into(),
                img_url: "http://cdn.example.com/1.jpg".into(),
                room_count: 2,
                order_count: orders,
                address: "1 Main St".into(),
                ctime: day.to_owned(),
            },
            area,
        }
    }

    fn date(s: &str) -> common::Date {
        s.parse().unwrap()
    }

    fn titles(payload: &Payload) -> Vec<String> {
        let v: serde_json::Value =
            serde_json::from_str(payload.as_str()).unwrap();
        v["houses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["title"].as_str().unwrap().to_owned())
            .collect()
    }

    fn search(raw: &RawParams, area: Option<area::Id>) -> Search {
        Search::new(raw, area, DateRange::default(), PageNumber::FIRST)
    }

    #[test]
    fn cache_key_defaults_to_empty_values_and_new_sort() {
        assert_eq!(
            RawParams::default().cache_key().as_str(),
            "houses____new",
        );
    }

    #[test]
    fn cache_key_uses_raw_parameter_values() {
        let raw = RawParams {
            area: Some("a1".into()),
            start_date: Some("2026-09-01".into()),
            end_date: Some("2026-09-05".into()),
            sort: Some("booking".into()),
        };
        assert_eq!(
            raw.cache_key().as_str(),
            "houses_a1_2026-09-01_2026-09-05_booking",
        );
    }

    #[tokio::test]
    async fn returns_cached_page_untouched() {
        let cache = FakeCache::default();
        drop(cache.values.lock().unwrap().insert(
            ("houses____new".to_owned(), Some("1".to_owned())),
            r#"{"houses":[],"total_page":3,"current_page":1}"#.to_owned(),
        ));
        let svc = service(FakeDb::default(), cache);

        let payload =
            svc.execute(search(&RawParams::default(), None)).await.unwrap();

        assert_eq!(
            payload.as_str(),
            r#"{"houses":[],"total_page":3,"current_page":1}"#,
        );
        assert!(svc.database().searches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn treats_empty_cached_page_as_miss() {
        let cache = FakeCache::default();
        drop(cache.values.lock().unwrap().insert(
            ("houses____new".to_owned(), Some("1".to_owned())),
            String::new(),
        ));
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![listed("h1", area, 10000, 0, "2026-08-01")],
            ..FakeDb::default()
        };
        let svc = service(db, cache);

        let payload =
            svc.execute(search(&RawParams::default(), None)).await.unwrap();

        assert_eq!(titles(&payload), ["h1"]);
        assert_eq!(svc.database().searches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn populates_cache_on_miss() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![listed("h1", area, 10000, 0, "2026-08-01")],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let payload =
            svc.execute(search(&RawParams::default(), None)).await.unwrap();

        let values = svc.cache().values.lock().unwrap();
        assert_eq!(
            values
                .get(&("houses____new".to_owned(), Some("1".to_owned())))
                .map(String::as_str),
            Some(payload.as_str()),
        );
        assert_eq!(
            svc.cache().ttls.lock().unwrap().get("houses____new"),
            Some(&Duration::from_secs(7200)),
        );
    }

    #[tokio::test]
    async fn serves_overflowing_page_without_caching_it() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![listed("h1", area, 10000, 0, "2026-08-01")],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let mut query = search(&RawParams::default(), None);
        query.page = PageNumber::new(5).unwrap();
        let payload = svc.execute(query).await.unwrap();

        let v: serde_json::Value =
            serde_json::from_str(payload.as_str()).unwrap();
        assert_eq!(v["houses"].as_array().unwrap().len(), 0);
        assert_eq!(v["total_page"], 1);
        assert_eq!(v["current_page"], 5);
        assert!(svc.cache().values.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reports_zero_pages_for_empty_listing() {
        let svc = service(FakeDb::default(), FakeCache::default());

        let payload =
            svc.execute(search(&RawParams::default(), None)).await.unwrap();

        let v: serde_json::Value =
            serde_json::from_str(payload.as_str()).unwrap();
        assert_eq!(v["total_page"], 0);
        // The first page overflows an empty listing, so nothing is stored.
        assert!(svc.cache().values.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_misses_agree_and_leave_one_cached_value() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![listed("h1", area, 10000, 0, "2026-08-01")],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let (first, second) = tokio::join!(
            svc.execute(search(&RawParams::default(), None)),
            svc.execute(search(&RawParams::default(), None)),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        // Both searches miss the cache, query the database and succeed.
        assert_eq!(svc.database().searches.lock().unwrap().len(), 2);
        assert_eq!(first, second);

        let values = svc.cache().values.lock().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(
            values
                .get(&("houses____new".to_owned(), Some("1".to_owned())))
                .map(String::as_str),
            Some(first.as_str()),
        );
        assert_eq!(
            svc.cache().ttls.lock().unwrap().get("houses____new"),
            Some(&Duration::from_secs(7200)),
        );
    }

    #[tokio::test]
    async fn survives_cache_lookup_failure() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![listed("h1", area, 10000, 0, "2026-08-01")],
            ..FakeDb::default()
        };
        let cache = FakeCache { fail_reads: true, ..FakeCache::default() };
        let svc = service(db, cache);

        let payload =
            svc.execute(search(&RawParams::default(), None)).await.unwrap();

        assert_eq!(titles(&payload), ["h1"]);
    }

    #[tokio::test]
    async fn skips_conflict_lookup_without_dates() {
        let svc = service(FakeDb::default(), FakeCache::default());

        drop(svc.execute(search(&RawParams::default(), None)).await.unwrap());

        assert!(svc.database().conflict_lookups.lock().unwrap().is_empty());
        let searches = svc.database().searches.lock().unwrap();
        assert!(searches[0].excluded.is_empty());
    }

    #[tokio::test]
    async fn excludes_houses_booked_within_dates() {
        let area = area::Id::new();
        let booked = listed("booked", area, 10000, 0, "2026-08-01");
        let free = listed("free", area, 20000, 0, "2026-08-02");
        let db = FakeDb {
            bookings: vec![(
                booked.summary.house_id,
                date("2026-09-02"),
                date("2026-09-04"),
            )],
            listed: vec![booked, free],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let raw = RawParams {
            start_date: Some("2026-09-01".into()),
            end_date: Some("2026-09-05".into()),
            ..RawParams::default()
        };
        let dates = DateRange::new(
            Some(date("2026-09-01")),
            Some(date("2026-09-05")),
        )
        .unwrap();
        let payload = svc
            .execute(Search::new(&raw, None, dates, PageNumber::FIRST))
            .await
            .unwrap();

        assert_eq!(titles(&payload), ["free"]);
    }

    #[tokio::test]
    async fn applies_one_sided_date_bound() {
        let area = area::Id::new();
        let past = listed("past", area, 10000, 0, "2026-08-01");
        let upcoming = listed("upcoming", area, 20000, 0, "2026-08-02");
        let db = FakeDb {
            bookings: vec![
                (past.summary.house_id, date("2026-01-10"), date("2026-01-20")),
                (
                    upcoming.summary.house_id,
                    date("2026-12-10"),
                    date("2026-12-20"),
                ),
            ],
            listed: vec![past, upcoming],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        // Only bookings ending on or after the begin date conflict.
        let raw = RawParams {
            start_date: Some("2026-09-01".into()),
            ..RawParams::default()
        };
        let dates =
            DateRange::new(Some(date("2026-09-01")), None).unwrap();
        let payload = svc
            .execute(Search::new(&raw, None, dates, PageNumber::FIRST))
            .await
            .unwrap();

        assert_eq!(titles(&payload), ["past"]);
    }

    #[tokio::test]
    async fn orders_by_price() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![
                listed("mid", area, 20000, 0, "2026-08-01"),
                listed("cheap", area, 10000, 0, "2026-08-02"),
            ],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let raw = RawParams {
            sort: Some("price-asc".into()),
            ..RawParams::default()
        };
        let payload = svc.execute(search(&raw, None)).await.unwrap();
        assert_eq!(titles(&payload), ["cheap", "mid"]);

        let raw = RawParams {
            sort: Some("price-desc".into()),
            ..RawParams::default()
        };
        let payload = svc.execute(search(&raw, None)).await.unwrap();
        assert_eq!(titles(&payload), ["mid", "cheap"]);
    }

    #[tokio::test]
    async fn unrecognized_sort_key_falls_back_to_newest() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![
                listed("old", area, 10000, 5, "2026-08-01"),
                listed("recent", area, 20000, 1, "2026-08-02"),
            ],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let raw = RawParams {
            sort: Some("price-inc".into()),
            ..RawParams::default()
        };
        let payload = svc.execute(search(&raw, None)).await.unwrap();

        assert_eq!(titles(&payload), ["recent", "old"]);
    }

    #[tokio::test]
    async fn filters_by_area() {
        let downtown = area::Id::new();
        let suburbs = area::Id::new();
        let db = FakeDb {
            listed: vec![
                listed("downtown", downtown, 10000, 0, "2026-08-01"),
                listed("suburbs", suburbs, 20000, 0, "2026-08-02"),
            ],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let raw = RawParams {
            area: Some(downtown.to_string()),
            ..RawParams::default()
        };
        let payload =
            svc.execute(search(&raw, Some(downtown))).await.unwrap();

        assert_eq!(titles(&payload), ["downtown"]);
    }

    #[tokio::test]
    async fn home_page_returns_cached_payload() {
        let cache = FakeCache::default();
        drop(cache.values.lock().unwrap().insert(
            (HomePage::CACHE_KEY.to_owned(), None),
            "[1,2,3]".to_owned(),
        ));
        let svc = service(FakeDb::default(), cache);

        let payload = svc.execute(HomePage).await.unwrap().unwrap();

        assert_eq!(payload.as_str(), "[1,2,3]");
    }

    #[tokio::test]
    async fn home_page_caches_database_result() {
        let area = area::Id::new();
        let db = FakeDb {
            listed: vec![listed("h1", area, 10000, 3, "2026-08-01")],
            ..FakeDb::default()
        };
        let svc = service(db, FakeCache::default());

        let payload = svc.execute(HomePage).await.unwrap().unwrap();

        let values = svc.cache().values.lock().unwrap();
        assert_eq!(
            values
                .get(&(HomePage::CACHE_KEY.to_owned(), None))
                .map(String::as_str),
            Some(payload.as_str()),
        );
    }

    #[tokio::test]
    async fn home_page_without_houses_is_not_cached() {
        let svc = service(FakeDb::default(), FakeCache::default());

        assert!(svc.execute(HomePage).await.unwrap().is_none());
        assert!(svc.cache().values.lock().unwrap().is_empty());
    }
}
