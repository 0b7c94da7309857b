//! Order-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    DateRange,
};
use tracerr::Traced;

use crate::{
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<read::order::Conflicts, DateRange>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::order::Conflicts;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::order::Conflicts, DateRange>>,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();

        let rows = match (range.begin(), range.end()) {
            (Some(begin), Some(end)) => {
                const SQL: &str = "\
                    SELECT DISTINCT house_id \
                    FROM orders \
                    WHERE begin_date <= $1::DATE \
                      AND end_date >= $2::DATE";
                self.query(SQL, &[&end, &begin])
                    .await
                    .map_err(tracerr::wrap!())?
            }
            (Some(begin), None) => {
                const SQL: &str = "\
                    SELECT DISTINCT house_id \
                    FROM orders \
                    WHERE end_date >= $1::DATE";
                self.query(SQL, &[&begin])
                    .await
                    .map_err(tracerr::wrap!())?
            }
            (None, Some(end)) => {
                const SQL: &str = "\
                    SELECT DISTINCT house_id \
                    FROM orders \
                    WHERE begin_date <= $1::DATE";
                self.query(SQL, &[&end]).await.map_err(tracerr::wrap!())?
            }
            (None, None) => return Ok(read::order::Conflicts::default()),
        };

        Ok(rows
            .into_iter()
            .map(|row| row.get("house_id"))
            .collect::<Vec<_>>()
            .into())
    }
}
