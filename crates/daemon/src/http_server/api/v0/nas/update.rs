//! Update NAS API endpoint

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::NasPatch;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    Path(nasname): Path<String>,
    Json(patch): Json<NasPatch>,
) -> Result<Response, ApiError> {
    let updated = state.nas().update(&nasname, &patch).await?;

    let location = state.absolute_url(&format!("/api/v0/nas/{}", updated.nasname));
    let mut response = Json(updated).into_response();
    try_insert_header(&mut response, header::LOCATION, &location);
    Ok(response)
}
