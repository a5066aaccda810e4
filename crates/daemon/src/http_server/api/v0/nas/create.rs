//! Create NAS API endpoint

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::Nas;

use crate::http_server::api::{error::ApiError, try_insert_header};
use crate::ServiceState;

pub async fn handler(
    State(state): State<ServiceState>,
    Json(nas): Json<Nas>,
) -> Result<Response, ApiError> {
    let created = state.nas().create(&nas).await?;

    let location = state.absolute_url(&format!("/api/v0/nas/{}", created.nasname));
    let mut response = (StatusCode::CREATED, Json(created)).into_response();
    try_insert_header(&mut response, header::LOCATION, &location);
    Ok(response)
}
