//! Update group API endpoint

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::GroupPatch;
use serde::Deserialize;

use crate::http_server::api::{default_true, error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct UpdateGroupQuery {
    /// Also create listed members that do not exist yet.
    #[serde(default)]
    pub allow_users_creation: bool,
    /// Refuse the update when it would make a listed member vanish.
    #[serde(default = "default_true")]
    pub prevent_users_deletion: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(groupname): Path<String>,
    Query(query): Query<UpdateGroupQuery>,
    Json(patch): Json<GroupPatch>,
) -> Result<Response, ApiError> {
    let updated = state
        .groups()
        .update(
            &groupname,
            &patch,
            query.allow_users_creation,
            query.prevent_users_deletion,
        )
        .await?;

    let location = state.absolute_url(&format!("/api/v0/groups/{}", updated.groupname));
    let mut response = Json(updated).into_response();
    try_insert_header(&mut response, header::LOCATION, &location);
    Ok(response)
}
