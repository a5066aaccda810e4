//! Get user API endpoint

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http_server::api::error::ApiError;
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let user = state.users().get(&username).await?;
    Ok(Json(user).into_response())
}
