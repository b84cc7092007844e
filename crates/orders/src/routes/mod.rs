//! API route handlers for the async-orders server.

pub mod health;
pub mod orders;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET  /api/health - Health check
/// - GET  /api/orders/test - Liveness string
/// - POST /api/orders/create?orderId={id} - Submit an order
/// - GET  /api/orders/status/{id} - Poll an order
/// - GET  /api/orders/{id} - Final order resource
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", orders::router())
        .with_state(state)
}
