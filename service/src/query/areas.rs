//! [`Query`] collection related to [`Area`]s.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Area;
use crate::{
    infra::{cache, database, Cache, Database},
    read, Query, Service,
};

use super::Payload;

/// [`Query`] of all the [`Area`]s houses are grouped by.
///
/// Resolves into [`None`] when no [`Area`]s exist, and such an outcome is not
/// cached.
#[derive(Clone, Copy, Debug)]
pub struct List;

impl List {
    /// [`cache::Key`] the [`Area`] list is cached under.
    pub const CACHE_KEY: &'static str = "area_info";
}

impl<Db, Ch> Query<List> for Service<Db, Ch>
where
    Db: Database<
        Select<By<Vec<read::area::Info>, ()>>,
        Ok = Vec<read::area::Info>,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<cache::Read, Ok = Option<String>, Err = Traced<cache::Error>>
        + Cache<cache::Write, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Option<Payload>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        match self
            .cache()
            .execute(cache::Read(List::CACHE_KEY.into()))
            .await
        {
            Ok(Some(cached)) if !cached.is_empty() => {
                log::debug!("area list cache hit");
                return Ok(Some(cached.into()));
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("area list cache lookup failed: {e}");
            }
        }

        let areas = self
            .database()
            .execute(Select(By::<Vec<read::area::Info>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        if areas.is_empty() {
            return Ok(None);
        }

        let payload = Payload::encode(&areas);

        if let Err(e) = self
            .cache()
            .execute(cache::Write {
                key: List::CACHE_KEY.into(),
                value: payload.as_str().to_owned(),
                ttl: self.config().area_info_ttl,
            })
            .await
        {
            log::warn!("area list cache population failed: {e}");
        }

        Ok(Some(payload))
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Select},
        pagination::Capacity,
    };
    use tracerr::Traced;

    use crate::{
        domain::area,
        infra::{database, Database},
        query::testing::FakeCache,
        read, Config, Query as _, Service,
    };

    use super::List;

    #[derive(Debug, Default)]
    struct FakeDb {
        areas: Vec<read::area::Info>,
    }

    impl Database<Select<By<Vec<read::area::Info>, ()>>> for FakeDb {
        type Ok = Vec<read::area::Info>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(_): Select<By<Vec<read::area::Info>, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.areas.clone())
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

    #[tokio::test]
    async fn returns_cached_list_untouched() {
        let cache = FakeCache::default();
        drop(cache.values.lock().unwrap().insert(
            (List::CACHE_KEY.to_owned(), None),
            r#"[{"aid":"a1","aname":"Downtown"}]"#.to_owned(),
        ));
        let svc = Service::new(config(), FakeDb::default(), cache);

        let payload = svc.execute(List).await.unwrap().unwrap();

        assert_eq!(payload.as_str(), r#"[{"aid":"a1","aname":"Downtown"}]"#);
    }

    #[tokio::test]
    async fn caches_database_result() {
        let db = FakeDb {
            areas: vec![read::area::Info {
                id: area::Id::new(),
                name: "Downtown".into(),
            }],
        };
        let svc = Service::new(config(), db, FakeCache::default());

        let payload = svc.execute(List).await.unwrap().unwrap();

        let values = svc.cache().values.lock().unwrap();
        assert_eq!(
            values
                .get(&(List::CACHE_KEY.to_owned(), None))
                .map(String::as_str),
            Some(payload.as_str()),
        );
    }

    #[tokio::test]
    async fn empty_list_is_not_cached() {
        let svc =
            Service::new(config(), FakeDb::default(), FakeCache::default());

        assert!(svc.execute(List).await.unwrap().is_none());
        assert!(svc.cache().values.lock().unwrap().is_empty());
    }
}
