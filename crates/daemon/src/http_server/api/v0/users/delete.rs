//! Delete user API endpoint

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http_server::api::{default_true, error::ApiError};
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    /// Refuse the delete when it would make a referenced group vanish.
    #[serde(default = "default_true")]
    pub prevent_groups_deletion: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(username): Path<String>,
    Query(query): Query<DeleteUserQuery>,
) -> Result<Response, ApiError> {
    state
        .users()
        .delete(&username, query.prevent_groups_deletion)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
