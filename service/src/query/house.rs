//! [`Query`] collection related to a single [`House`].

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::House;
use crate::{
    domain::house,
    infra::{cache, database, Cache, Database},
    read, Query, Service,
};

use super::Payload;

/// [`Query`] of the full view of a single [`House`].
///
/// Resolves into [`None`] when no such [`House`] exists.
#[derive(Clone, Copy, Debug)]
pub struct Detail(pub house::Id);

impl Detail {
    /// Returns the [`cache::Key`] the queried [`House`] view is cached under.
    #[must_use]
    pub fn cache_key(&self) -> cache::Key {
        format!("house_info_{}", self.0).into()
    }
}

impl<Db, Ch> Query<Detail> for Service<Db, Ch>
where
    Db: Database<
        Select<By<Option<read::house::detail::Info>, house::Id>>,
        Ok = Option<read::house::detail::Info>,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<cache::Read, Ok = Option<String>, Err = Traced<cache::Error>>
        + Cache<cache::Write, Ok = (), Err = Traced<cache::Error>>,
{
    type Ok = Option<Payload>;
    type Err = Traced<database::Error>;

    async fn execute(&self, detail: Detail) -> Result<Self::Ok, Self::Err> {
        let key = detail.cache_key();

        match self.cache().execute(cache::Read(key.clone())).await {
            Ok(Some(cached)) if !cached.is_empty() => {
                log::debug!(key = key.as_str(), "house detail cache hit");
                return Ok(Some(cached.into()));
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("house detail cache lookup failed: {e}");
            }
        }

        let Detail(id) = detail;
        let Some(info) = self
            .database()
            .execute(Select(
                By::<Option<read::house::detail::Info>, _>::new(id),
            ))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let payload = Payload::encode(&info);

        if let Err(e) = self
            .cache()
            .execute(cache::Write {
                key,
                value: payload.as_str().to_owned(),
                ttl: self.config().house_detail_ttl,
            })
            .await
        {
            log::warn!("house detail cache population failed: {e}");
        }

        Ok(Some(payload))
    }
}
