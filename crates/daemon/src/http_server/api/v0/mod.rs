use axum::Router;

pub mod groups;
pub mod nas;
pub mod users;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/users", users::router(state.clone()))
        .nest("/groups", groups::router(state.clone()))
        .nest("/nas", nas::router(state.clone()))
        .with_state(state)
}
