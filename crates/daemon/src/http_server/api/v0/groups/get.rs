//! Get group API endpoint

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http_server::api::error::ApiError;
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    Path(groupname): Path<String>,
) -> Result<Response, ApiError> {
    let group = state.groups().get(&groupname).await?;
    Ok(Json(group).into_response())
}
