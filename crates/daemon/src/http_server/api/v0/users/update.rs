//! Update user API endpoint

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::UserPatch;
use serde::Deserialize;

use crate::http_server::api::{default_true, error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserQuery {
    /// Also create referenced groups that do not exist yet.
    #[serde(default)]
    pub allow_groups_creation: bool,
    /// Refuse the update when it would make a referenced group vanish.
    #[serde(default = "default_true")]
    pub prevent_groups_deletion: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(username): Path<String>,
    Query(query): Query<UpdateUserQuery>,
    Json(patch): Json<UserPatch>,
) -> Result<Response, ApiError> {
    let updated = state
        .users()
        .update(
            &username,
            &patch,
            query.allow_groups_creation,
            query.prevent_groups_deletion,
        )
        .await?;

    let location = state.absolute_url(&format!("/api/v0/users/{}", updated.username));
    let mut response = Json(updated).into_response();
    try_insert_header(&mut response, header::LOCATION, &location);
    Ok(response)
}
