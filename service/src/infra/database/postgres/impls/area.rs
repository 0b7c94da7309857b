//! [`Area`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Area;
use crate::{
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Vec<read::area::Info>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::area::Info>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::area::Info>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM areas \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::area::Info {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}
