//! List NAS API endpoint

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

#[derive(Debug, Default, Deserialize)]
pub struct ListNasQuery {
    /// Resume listing strictly after this nasname.
    pub nasname_gt: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<ListNasQuery>,
) -> Result<Response, ApiError> {
    let nas_list = state.nas().find(query.nasname_gt.as_deref()).await?;

    let next = nas_list.last().map(|nas| {
        let url = state.absolute_url(&format!("/api/v0/nas?nasname_gt={}", nas.nasname));
        format!("<{url}>; rel=\"next\"")
    });

    let mut response = Json(nas_list).into_response();
    if let Some(next) = next {
        try_insert_header(&mut response, header::LINK, &next);
    }
    Ok(response)
}
