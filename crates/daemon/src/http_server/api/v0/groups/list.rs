//! List groups API endpoint

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Default, Deserialize)]
pub struct ListGroupsQuery {
    /// Resume listing strictly after this groupname.
    pub groupname_gt: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<ListGroupsQuery>,
) -> Result<Response, ApiError> {
    let groups = state.groups().find(query.groupname_gt.as_deref()).await?;

    let next = groups.last().map(|group| {
        let url = state.absolute_url(&format!("/api/v0/groups?groupname_gt={}", group.groupname));
        format!("<{url}>; rel=\"next\"")
    });

    let mut response = Json(groups).into_response();
    if let Some(next) = next {
        try_insert_header(&mut response, header::LINK, &next);
    }
    Ok(response)
}
