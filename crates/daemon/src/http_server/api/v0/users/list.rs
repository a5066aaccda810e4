//! List users API endpoint

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Resume listing strictly after this username.
    pub username_gt: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Response, ApiError> {
    let users = state.users().find(query.username_gt.as_deref()).await?;

    let next = users.last().map(|user| {
        let url = state.absolute_url(&format!("/api/v0/users?username_gt={}", user.username));
        format!("<{url}>; rel=\"next\"")
    });

    let mut response = Json(users).into_response();
    if let Some(next) = next {
        try_insert_header(&mut response, header::LINK, &next);
    }
    Ok(response)
}
