//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring (event catalog, profile store, upgrade flow)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use eventtier_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(build_app_with(config, Arc::new(services)))
}

/// Build the router around already-wired services (tests inject stores here).
pub fn build_app_with(config: &AppConfig, services: Arc<AppServices>) -> Router {
    let jwt = Arc::new(eventtier_auth::Hs256JwtValidator::new(
        config.jwt_secret.clone().into_bytes(),
    ));
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(Extension(config.clone())),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
