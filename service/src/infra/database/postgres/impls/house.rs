//! [`House`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    pagination::{Capacity, PageNumber, TotalPages},
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{house, House},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<read::house::list::Page, read::house::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::house::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::house::list::Page, read::house::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::house::list::Selector {
            area,
            excluded,
            sort,
            page,
            capacity,
        } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let area_idx = area.as_ref().map(|a| {
            ps.push(a);
            ps.len()
        });
        let excluded_idx = (!excluded.is_empty()).then(|| {
            ps.push(&excluded);
            ps.len()
        });

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM houses AS h \
             WHERE true{predicates}",
            predicates = where_sql(area_idx, excluded_idx),
        );
        let total_items = self
            .query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .map_or(0, |row| row.get::<_, i64>(0));
        let total =
            TotalPages::of(u64::try_from(total_items).unwrap(), capacity);

        let limit = i64::from(capacity.get());
        let offset = sql_offset(page, capacity);
        ps.push(&limit);
        let limit_idx = ps.len();
        ps.push(&offset);
        let offset_idx = ps.len();

        let sql = format!(
            "SELECT h.id, h.title, h.price, h.address, \
                    h.room_count, h.order_count, \
                    h.index_image, h.created_at, \
                    a.name AS area_name \
             FROM houses AS h \
             JOIN areas AS a ON a.id = h.area_id \
             WHERE true{predicates} \
             ORDER BY h.{ordering} \
             LIMIT ${limit_idx}::INT8 OFFSET ${offset_idx}::INT8",
            predicates = where_sql(area_idx, excluded_idx),
            ordering = sort.sql(),
        );
        let houses = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(summary)
            .collect();

        Ok(read::house::list::Page {
            houses,
            total,
            current: page,
        })
    }
}

impl<C> Database<Select<By<Option<read::house::detail::Info>, house::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::house::detail::Info>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::house::detail::Info>, house::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, area_id, title, price, address, \
                   room_count, acreage, unit, capacity, beds, \
                   deposit, min_days, max_days, \
                   index_image, order_count, created_at \
            FROM houses \
            WHERE id = $1::UUID \
            LIMIT 1";
        let Some(row) =
            self.query_opt(SQL, &[&id]).await.map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let house = House {
            id,
            user_id: row.get("user_id"),
            area_id: row.get("area_id"),
            title: row.get("title"),
            price: row.get("price"),
            address: row.get("address"),
            room_count: u16::try_from(row.get::<_, i32>("room_count"))
                .expect("`room_count` overflow"),
            acreage: u32::try_from(row.get::<_, i32>("acreage"))
                .expect("`acreage` overflow"),
            unit: row.get("unit"),
            capacity: u16::try_from(row.get::<_, i32>("capacity"))
                .expect("`capacity` overflow"),
            beds: row.get("beds"),
            deposit: row.get("deposit"),
            min_days: u16::try_from(row.get::<_, i32>("min_days"))
                .expect("`min_days` overflow"),
            max_days: u16::try_from(row.get::<_, i32>("max_days"))
                .expect("`max_days` overflow"),
            index_image: row.get("index_image"),
            order_count: u32::try_from(row.get::<_, i32>("order_count"))
                .expect("`order_count` overflow"),
            created_at: row.get("created_at"),
        };

        const FACILITIES_SQL: &str = "\
            SELECT facility_id \
            FROM house_facilities \
            WHERE house_id = $1::UUID \
            ORDER BY facility_id";
        let facilities = self
            .query(FACILITIES_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("facility_id"))
            .collect();

        Ok(Some((house, facilities).into()))
    }
}

impl<C>
    Database<
        Select<By<Vec<read::house::list::Summary>, read::house::home::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::house::list::Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::house::list::Summary>, read::house::home::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::house::home::Selector { limit } = by.into_inner();
        let limit = i64::from(limit);

        const SQL: &str = "\
            SELECT h.id, h.title, h.price, h.address, \
                   h.room_count, h.order_count, \
                   h.index_image, h.created_at, \
                   a.name AS area_name \
            FROM houses AS h \
            JOIN areas AS a ON a.id = h.area_id \
            WHERE h.index_image IS NOT NULL \
            ORDER BY h.order_count DESC \
            LIMIT $1::INT8";
        Ok(self
            .query(SQL, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(summary)
            .collect())
    }
}

/// Builds the `WHERE` clause predicates of a [`House`] listing out of the
/// provided parameter indices.
fn where_sql(area_idx: Option<usize>, excluded_idx: Option<usize>) -> String {
    format!(
        "{area}{excluded}",
        area = area_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!(" AND h.area_id = ${idx}::UUID"))
        }),
        excluded = excluded_idx.into_iter().format_with("", |idx, f| {
            f(&format_args!(" AND h.id <> ALL(${idx}::UUID[])"))
        }),
    )
}

/// Converts the provided page offset into an `OFFSET` parameter, saturating
/// at [`i64::MAX`].
fn sql_offset(page: PageNumber, capacity: Capacity) -> i64 {
    i64::try_from(page.offset(capacity)).unwrap_or(i64::MAX)
}

/// Converts the provided [`Row`] into a [`read::house::list::Summary`].
fn summary(row: &Row) -> read::house::list::Summary {
    read::house::list::Summary {
        house_id: row.get("id"),
        title: row.get("title"),
        price: row.get("price"),
        area_name: row.get("area_name"),
        img_url: row
            .get::<_, Option<house::ImageUrl>>("index_image")
            .map(Into::into)
            .unwrap_or_default(),
        room_count: u16::try_from(row.get::<_, i32>("room_count"))
            .expect("`room_count` overflow"),
        order_count: u32::try_from(row.get::<_, i32>("order_count"))
            .expect("`order_count` overflow"),
        address: row.get("address"),
        ctime: row
            .get::<_, house::CreationDateTime>("created_at")
            .to_date_string(),
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{Capacity, PageNumber};

    use super::{sql_offset, where_sql};

    #[test]
    fn where_sql_is_empty_without_predicates() {
        assert_eq!(where_sql(None, None), "");
    }

    #[test]
    fn where_sql_filters_by_area() {
        assert_eq!(where_sql(Some(1), None), " AND h.area_id = $1::UUID");
    }

    #[test]
    fn where_sql_excludes_conflicting_houses() {
        assert_eq!(where_sql(None, Some(1)), " AND h.id <> ALL($1::UUID[])");
    }

    #[test]
    fn where_sql_combines_predicates_in_order() {
        assert_eq!(
            where_sql(Some(1), Some(2)),
            " AND h.area_id = $1::UUID AND h.id <> ALL($2::UUID[])",
        );
    }

    #[test]
    fn sql_offset_saturates_beyond_i64() {
        assert_eq!(sql_offset(PageNumber::FIRST, Capacity::MIN), 0);
        assert_eq!(
            sql_offset(
                PageNumber::new(2).unwrap(),
                Capacity::new(25).unwrap(),
            ),
            25,
        );

        assert_eq!(
            sql_offset(
                PageNumber::new(u32::MAX).unwrap(),
                Capacity::new(u32::MAX).unwrap(),
            ),
            i64::MAX,
        );
    }
}
