//! Create user API endpoint

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::User;
use serde::Deserialize;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserQuery {
    /// Also create referenced groups that do not exist yet.
    #[serde(default)]
    pub allow_groups_creation: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<CreateUserQuery>,
    Json(user): Json<User>,
) -> Result<Response, ApiError> {
    let created = state
        .users()
        .create(&user, query.allow_groups_creation)
        .await?;

    let location = state.absolute_url(&format!("/api/v0/users/{}", created.username));
    let mut response = (StatusCode::CREATED, Json(created)).into_response();
    try_insert_header(&mut response, header::LOCATION, &location);
    Ok(response)
}
