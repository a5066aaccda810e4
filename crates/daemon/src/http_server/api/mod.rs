use axum::http::{header::HeaderName, HeaderValue};
use axum::response::Response;
use axum::Router;

pub mod error;
pub mod v0;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/v0", v0::router(state.clone()))
        .with_state(state)
}

/// Header values are built from user-supplied names; skip the header rather
/// than fail the whole response when a name is not valid header text.
pub(crate) fn try_insert_header(response: &mut Response, name: HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        response.headers_mut().insert(name, value);
    }
}

pub(crate) fn default_true() -> bool {
    true
}
