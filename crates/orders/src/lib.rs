// crates/orders/src/lib.rs
//! Async-orders server library.
//!
//! An Axum HTTP service demonstrating asynchronous request-reply: orders are
//! accepted immediately, completed by a background task, and polled through
//! a status endpoint that redirects to the final resource once done.

pub mod config;
pub mod error;
pub mod jobs;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use error::*;
pub use routes::api_routes;
pub use state::{AppState, OrderId, OrderStatus, OrderStore, PROCESSING_DELAY};

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
