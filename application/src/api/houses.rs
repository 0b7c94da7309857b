//! House-related HTTP API handlers.

use axum::{extract, Extension};
use common::{pagination::PageNumber, Date, DateRange};
use serde::Deserialize;
use service::{
    domain::{area, house},
    query, Query as _,
};

use crate::{define_error, AsError as _, Error};

use super::{non_empty, ApiResponse};

define_error! {
    enum ListError {
        #[errno = 4004]
        #[message = "Malformed date parameter"]
        DateFormat,

        #[errno = 4004]
        #[message = "Malformed page parameter"]
        PageFormat,

        #[errno = 4103]
        #[message = "Malformed area parameter"]
        AreaFormat,
    }
}

define_error! {
    enum HomeError {
        #[errno = 4002]
        #[message = "No houses to show"]
        NoHouses,
    }
}

define_error! {
    enum DetailError {
        #[errno = 4103]
        #[message = "Malformed house ID"]
        IdFormat,

        #[errno = 4002]
        #[message = "House not found"]
        NotFound,
    }
}

/// Query string parameters of the [`list`] handler.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    /// Requested area ID.
    pub aid: Option<String>,

    /// Requested first day of the rental.
    pub sd: Option<String>,

    /// Requested last day of the rental.
    pub ed: Option<String>,

    /// Requested sort key.
    pub sk: Option<String>,

    /// Requested page number.
    pub p: Option<String>,
}

/// Handles searching of houses available for booking.
pub async fn list(
    Extension(service): Extension<crate::Service>,
    extract::Query(params): extract::Query<ListParams>,
) -> Result<ApiResponse, Error> {
    let search = parse_search(params)?;
    service
        .execute(search)
        .await
        .map(ApiResponse)
        .map_err(|e| e.into_error())
}

/// Handles the home page houses.
pub async fn index(
    Extension(service): Extension<crate::Service>,
) -> Result<ApiResponse, Error> {
    service
        .execute(query::houses::HomePage)
        .await
        .map_err(|e| e.into_error())?
        .map(ApiResponse)
        .ok_or_else(|| HomeError::NoHouses.into())
}

/// Handles the full view of a single house.
pub async fn detail(
    Extension(service): Extension<crate::Service>,
    extract::Path(house_id): extract::Path<String>,
) -> Result<ApiResponse, Error> {
    let id = house_id
        .parse::<house::Id>()
        .map_err(|_| DetailError::IdFormat)?;
    service
        .execute(query::house::Detail(id))
        .await
        .map_err(|e| e.into_error())?
        .map(ApiResponse)
        .ok_or_else(|| DetailError::NotFound.into())
}

/// Validates the provided [`ListParams`] into a [`query::houses::Search`].
fn parse_search(
    params: ListParams,
) -> Result<query::houses::Search, Error> {
    let ListParams { aid, sd, ed, sk, p } = params;
    let raw = query::houses::RawParams {
        area: non_empty(aid),
        start_date: non_empty(sd),
        end_date: non_empty(ed),
        sort: non_empty(sk),
    };

    let area = raw
        .area
        .as_deref()
        .map(str::parse::<area::Id>)
        .transpose()
        .map_err(|_| ListError::AreaFormat)?;
    let begin = raw
        .start_date
        .as_deref()
        .map(str::parse::<Date>)
        .transpose()
        .map_err(|_| ListError::DateFormat)?;
    let end = raw
        .end_date
        .as_deref()
        .map(str::parse::<Date>)
        .transpose()
        .map_err(|_| ListError::DateFormat)?;
    let dates =
        DateRange::new(begin, end).map_err(|_| ListError::DateFormat)?;
    let page = non_empty(p)
        .map_or(Ok(PageNumber::FIRST), |p| p.parse())
        .map_err(|_| ListError::PageFormat)?;

    Ok(query::houses::Search::new(&raw, area, dates, page))
}

#[cfg(test)]
mod spec {
    use common::pagination::PageNumber;
    use service::read::house::list::SortKey;
    use uuid::Uuid;

    use super::{parse_search, ListParams};

    fn params() -> ListParams {
        ListParams::default()
    }

    #[test]
    fn defaults_to_first_page_and_newest_sort() {
        let search = parse_search(params()).unwrap();

        assert_eq!(search.page, PageNumber::FIRST);
        assert_eq!(search.sort, SortKey::New);
        assert_eq!(search.area, None);
        assert!(search.dates.is_empty());
        assert_eq!(search.key.as_str(), "houses____new");
    }

    #[test]
    fn empty_parameters_are_treated_as_absent() {
        let search = parse_search(ListParams {
            aid: Some(String::new()),
            sd: Some(String::new()),
            ed: Some(String::new()),
            sk: Some(String::new()),
            p: Some(String::new()),
        })
        .unwrap();

        assert_eq!(search.key.as_str(), "houses____new");
        assert_eq!(search.page, PageNumber::FIRST);
    }

    #[test]
    fn rejects_non_positive_and_malformed_pages() {
        for p in ["0", "-1", "abc"] {
            let err = parse_search(ListParams {
                p: Some(p.to_owned()),
                ..params()
            })
            .unwrap_err();
            assert_eq!(err.errno, 4004, "page `{p}` must be rejected");
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = parse_search(ListParams {
            sd: Some("2026-13-40".to_owned()),
            ..params()
        })
        .unwrap_err();
        assert_eq!(err.errno, 4004);

        let err = parse_search(ListParams {
            sd: Some("05.09.2026".to_owned()),
            ..params()
        })
        .unwrap_err();
        assert_eq!(err.errno, 4004);
    }

    #[test]
    fn rejects_inverted_date_range() {
        let err = parse_search(ListParams {
            sd: Some("2026-09-05".to_owned()),
            ed: Some("2026-09-01".to_owned()),
            ..params()
        })
        .unwrap_err();
        assert_eq!(err.errno, 4004);
    }

    #[test]
    fn rejects_malformed_area() {
        let err = parse_search(ListParams {
            aid: Some("not-a-uuid".to_owned()),
            ..params()
        })
        .unwrap_err();
        assert_eq!(err.errno, 4103);
    }

    #[test]
    fn unrecognized_sort_key_falls_back_but_keys_the_cache() {
        let search = parse_search(ListParams {
            sk: Some("price-inc".to_owned()),
            ..params()
        })
        .unwrap();

        assert_eq!(search.sort, SortKey::New);
        assert_eq!(search.key.as_str(), "houses____price-inc");
    }

    #[test]
    fn accepts_full_parameter_set() {
        let aid = Uuid::new_v4();
        let search = parse_search(ListParams {
            aid: Some(aid.to_string()),
            sd: Some("2026-09-01".to_owned()),
            ed: Some("2026-09-05".to_owned()),
            sk: Some("booking".to_owned()),
            p: Some("2".to_owned()),
        })
        .unwrap();

        assert_eq!(search.area, Some(aid.into()));
        assert_eq!(search.sort, SortKey::Booking);
        assert_eq!(search.page.get(), 2);
        assert_eq!(
            search.key.as_str(),
            format!("houses_{aid}_2026-09-01_2026-09-05_booking"),
        );
    }
}
