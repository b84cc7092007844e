// crates/orders/src/routes/orders.rs
//! Order endpoints implementing asynchronous request-reply.
//!
//! - GET  /orders/test — liveness string
//! - POST /orders/create?orderId={id} — submit an order, 202 + polling Location
//! - GET  /orders/status/{id} — 202 while processing, 303 to the order once completed
//! - GET  /orders/{id} — final resource

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, OrderId, OrderStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderParams {
    pub order_id: OrderId,
}

/// Body returned by the status endpoint.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq))]
pub struct StatusBody {
    pub status: OrderStatus,
}

/// Polling location handed out on submission.
pub fn status_location(id: OrderId) -> String {
    format!("/orders/status/{id}")
}

/// Location of the final resource once an order completes.
pub fn order_location(id: OrderId) -> String {
    format!("/api/orders/{id}")
}

/// GET /api/orders/test
async fn test_endpoint() -> &'static str {
    "Hello World!"
}

/// POST /api/orders/create?orderId={id}
async fn create_order(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CreateOrderParams>,
) -> impl IntoResponse {
    let id = params.order_id;
    let generation = state.orders.submit(id);
    state.completions.start(id, generation);
    tracing::info!(order_id = id, generation, "order accepted");

    (
        StatusCode::ACCEPTED,
        [(header::LOCATION, status_location(id))],
    )
}

/// GET /api/orders/status/{id}
async fn get_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
) -> ApiResult<Response> {
    let status = state
        .orders
        .status(id)
        .ok_or(ApiError::OrderNotFound(id))?;

    let response = match status {
        OrderStatus::Completed => (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, order_location(id))],
            Json(StatusBody { status }),
        )
            .into_response(),
        OrderStatus::Processing => {
            (StatusCode::ACCEPTED, Json(StatusBody { status })).into_response()
        }
    };
    Ok(response)
}

/// GET /api/orders/{id}
///
/// Answers for any known order, including one still processing.
async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
) -> ApiResult<String> {
    if !state.orders.contains(id) {
        return Err(ApiError::OrderNotFound(id));
    }
    Ok(format!("Order {id} is ready!"))
}

/// Build the orders router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders/test", get(test_endpoint))
        .route("/orders/create", post(create_order))
        .route("/orders/status/{id}", get(get_order_status))
        .route("/orders/{id}", get(get_order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(state: Arc<AppState>) -> Router {
        Router::new().nest("/api", router()).with_state(state)
    }

    async fn send(app: Router, method: &str, uri: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_locations() {
        assert_eq!(status_location(42), "/orders/status/42");
        assert_eq!(order_location(42), "/api/orders/42");
    }

    #[tokio::test]
    async fn test_create_returns_accepted_with_location() {
        let state = AppState::with_delay(Duration::from_secs(10));
        let response = send(app(state.clone()), "POST", "/api/orders/create?orderId=42").await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/orders/status/42"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
        assert_eq!(state.orders.status(42), Some(OrderStatus::Processing));
    }

    #[tokio::test]
    async fn test_create_without_order_id_is_rejected() {
        let state = AppState::with_delay(Duration::from_secs(10));
        let response = send(app(state.clone()), "POST", "/api/orders/create").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.orders.is_empty());
    }

    #[tokio::test]
    async fn test_final_resource_for_processing_order() {
        let state = AppState::with_delay(Duration::from_secs(10));
        state.orders.submit(5);

        let response = send(app(state), "GET", "/api/orders/5").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Order 5 is ready!");
    }

    #[tokio::test]
    async fn test_completed_status_redirects() {
        let state = AppState::with_delay(Duration::from_secs(10));
        state.orders.submit(8);
        state.orders.complete(8);

        let response = send(app(state), "GET", "/api/orders/status/8").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/orders/8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: StatusBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            StatusBody {
                status: OrderStatus::Completed
            }
        );
    }
}
