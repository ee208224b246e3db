//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared, lock-guarded invoice ledger
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::app::services::AppServices;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/", get(routes::system::index))
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest("/api", routes::legacy_router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(errors::panic_to_response))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
