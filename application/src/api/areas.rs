//! Area-related HTTP API handlers.

use axum::Extension;
use service::{query, Query as _};

use crate::{define_error, AsError as _, Error};

use super::ApiResponse;

define_error! {
    enum ListError {
        #[errno = 4002]
        #[message = "No areas found"]
        NoAreas,
    }
}

/// Handles listing of all the areas houses are grouped by.
pub async fn list(
    Extension(service): Extension<crate::Service>,
) -> Result<ApiResponse, Error> {
    service
        .execute(query::areas::List)
        .await
        .map_err(|e| e.into_error())?
        .map(ApiResponse)
        .ok_or_else(|| ListError::NoAreas.into())
}
