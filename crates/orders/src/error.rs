// crates/orders/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::state::OrderId;

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            // Unknown orders answer with a bare 404, no body.
            ApiError::OrderNotFound(id) => {
                tracing::debug!(order_id = %id, "Order not found");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
