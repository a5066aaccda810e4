use axum::extract::{Request, State};
use axum::http::{HeaderName, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::ServiceState;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Rejects requests whose X-API-Key header does not match the configured key.
/// When no key is configured the gate is disabled.
pub async fn require_api_key(
    State(state): State<ServiceState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(&API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"detail": "missing or invalid API key"})),
        )
            .into_response(),
    }
}
