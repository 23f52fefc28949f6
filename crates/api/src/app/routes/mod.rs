use axum::Router;

pub mod customers;
pub mod documents;
pub mod system;

/// Router for the registry endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/documents", documents::router())
}
