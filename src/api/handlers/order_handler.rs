//! Order screen handlers.
//!
//! Every mutation responds with the refreshed page so the caller never
//! renders stale rows.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::domain::{OrderStatus, OrderView, PaymentStatus};
use crate::errors::AppResult;
use crate::types::{ListQuery, PageView};

/// Shipping status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderStatusRequest {
    pub status: OrderStatus,
}

/// Payment status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentStatusRequest {
    pub status: PaymentStatus,
}

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/:id/status", put(set_status))
        .route("/:id", delete(remove))
}

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new().route("/:id/status", put(set_payment_status))
}

/// List orders joined with customer and payment
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of orders", body = OrderPage),
        (status = 502, description = "A source collection failed to load")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PageView<OrderView>>> {
    let page = state.orders.list(query).await?;
    Ok(Json(page))
}

/// Change an order's shipping status
#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    tag = "Orders",
    params(
        ("id" = i64, Path, description = "Order id"),
        ListQuery
    ),
    request_body = OrderStatusRequest,
    responses(
        (status = 200, description = "Refreshed page after the change", body = OrderPage),
        (status = 502, description = "The write or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ListQuery>,
    Json(payload): Json<OrderStatusRequest>,
) -> AppResult<Json<PageView<OrderView>>> {
    let page = state.orders.set_shipping_status(id, payload.status, query).await?;
    Ok(Json(page))
}

/// Change a payment's status
#[utoipa::path(
    put,
    path = "/payments/{id}/status",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Payment id"),
        ListQuery
    ),
    request_body = PaymentStatusRequest,
    responses(
        (status = 200, description = "Refreshed page after the change", body = OrderPage),
        (status = 502, description = "The write or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Json(payload): Json<PaymentStatusRequest>,
) -> AppResult<Json<PageView<OrderView>>> {
    let page = state
        .orders
        .set_payment_status(&id, payload.status, query)
        .await?;
    Ok(Json(page))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(
        ("id" = i64, Path, description = "Order id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Refreshed page after the delete", body = OrderPage),
        (status = 502, description = "The delete or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PageView<OrderView>>> {
    let page = state.orders.remove(id, query).await?;
    Ok(Json(page))
}
