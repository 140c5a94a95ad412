//! Customer screen handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};

use crate::api::AppState;
use crate::domain::CustomerRow;
use crate::errors::AppResult;
use crate::types::{ListQuery, PageView};

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/:id", delete(remove))
}

/// List customers with lifetime spend
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of customers", body = CustomerPage),
        (status = 502, description = "A source collection failed to load")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PageView<CustomerRow>>> {
    let page = state.customers.list(query).await?;
    Ok(Json(page))
}

/// Delete a customer account
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "Customers",
    params(
        ("id" = String, Path, description = "Customer account id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Refreshed page after the delete", body = CustomerPage),
        (status = 502, description = "The delete or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PageView<CustomerRow>>> {
    let page = state.customers.remove(&id, query).await?;
    Ok(Json(page))
}
