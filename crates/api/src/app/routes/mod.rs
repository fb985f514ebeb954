use axum::{routing::get, Router};

pub mod events;
pub mod system;
pub mod tiers;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/debug", get(system::debug))
        .nest("/events", events::router())
        .nest("/tiers", tiers::router())
}
