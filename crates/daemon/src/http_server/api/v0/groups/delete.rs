//! Delete group API endpoint

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http_server::api::{default_true, error::ApiError};
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct DeleteGroupQuery {
    /// Delete the group even when memberships still point at it.
    #[serde(default)]
    pub ignore_users: bool,
    /// Refuse the delete when dropping memberships would make a member vanish.
    #[serde(default = "default_true")]
    pub prevent_users_deletion: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(groupname): Path<String>,
    Query(query): Query<DeleteGroupQuery>,
) -> Result<Response, ApiError> {
    state
        .groups()
        .delete(&groupname, query.ignore_users, query.prevent_users_deletion)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
