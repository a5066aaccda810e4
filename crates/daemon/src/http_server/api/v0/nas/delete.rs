//! Delete NAS API endpoint

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http_server::api::error::ApiError;
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    Path(nasname): Path<String>,
) -> Result<Response, ApiError> {
    state.nas().delete(&nasname).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
