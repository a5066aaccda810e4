//! Create group API endpoint

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::Group;
use serde::Deserialize;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateGroupQuery {
    /// Also create listed members that do not exist yet.
    #[serde(default)]
    pub allow_users_creation: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<CreateGroupQuery>,
    Json(group): Json<Group>,
) -> Result<Response, ApiError> {
    let created = state
        .groups()
        .create(&group, query.allow_users_creation)
        .await?;

    let location = state.absolute_url(&format!("/api/v0/groups/{}", created.groupname));
    let mut response = (StatusCode::CREATED, Json(created)).into_response();
    try_insert_header(&mut response, header::LOCATION, &location);
    Ok(response)
}
