use axum::{routing, Router};

mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", routing::get(list::handler).post(create::handler))
        .route(
            "/:username",
            routing::get(get::handler)
                .patch(update::handler)
                .delete(delete::handler),
        )
        .with_state(state)
}
