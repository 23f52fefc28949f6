//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store and service wiring
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: query-string shapes
//! - `errors.rs`: error translation into consistent responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: ApiConfig) -> Router {
    let services = Arc::new(services::build_services(config));
    router_with_services(services)
}

/// Router over already-wired services; lets callers share a store with the app.
pub fn router_with_services(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
