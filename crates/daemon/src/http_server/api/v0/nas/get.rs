//! Get NAS API endpoint

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http_server::api::error::ApiError;
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    Path(nasname): Path<String>,
) -> Result<Response, ApiError> {
    let nas = state.nas().get(&nasname).await?;
    Ok(Json(nas).into_response())
}
