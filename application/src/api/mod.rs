//! HTTP API definitions.

pub mod areas;
pub mod houses;

use axum::response::{IntoResponse, Response};
use service::query::Payload;

/// Successful HTTP API response.
///
/// The [`Payload`] is spliced into the response envelope as-is, so cached
/// payloads reach the client byte-for-byte as they were stored.
#[derive(Clone, Debug)]
pub struct ApiResponse(pub Payload);

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (
            [(http::header::CONTENT_TYPE, "application/json")],
            format!(
                "{{\"errno\":0,\"errmsg\":\"OK\",\"data\":{}}}",
                self.0.as_str(),
            ),
        )
            .into_response()
    }
}

/// Normalizes an optional request parameter, treating an empty string the
/// same as an absent one.
pub(crate) fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod spec {
    use super::non_empty;

    #[test]
    fn empty_parameter_is_absent() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("new".to_owned())), Some("new".to_owned()));
    }
}
