//! Review board handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::DEFAULT_PAGE_NUMBER;
use crate::domain::ReviewReply;
use crate::errors::AppResult;
use crate::services::ReviewBoard;

/// Locates the board a mutation should refresh
#[derive(Debug, Deserialize, IntoParams)]
pub struct BoardQuery {
    /// Product whose board is being viewed
    pub product_id: i64,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
}

/// Create review routes, mounted under /reviews
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/reply", post(reply))
        .route("/:id", delete(remove))
}

/// Create the board listing route, mounted under /products
pub fn product_review_routes() -> Router<AppState> {
    Router::new().route("/:id/reviews", get(list))
}

/// List a product's reviews, newest first
#[utoipa::path(
    get,
    path = "/products/{product_id}/reviews",
    tag = "Reviews",
    params(
        ("product_id" = i64, Path, description = "Product id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of the board", body = ReviewBoard),
        (status = 502, description = "A source collection failed to load")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ReviewBoard>> {
    let board = state.reviews.list_for_product(product_id, query.page).await?;
    Ok(Json(board))
}

/// Store an owner reply on a review
#[utoipa::path(
    post,
    path = "/reviews/{id}/reply",
    tag = "Reviews",
    params(
        ("id" = i64, Path, description = "Review id"),
        BoardQuery
    ),
    request_body = ReviewReply,
    responses(
        (status = 200, description = "Refreshed board after the reply", body = ReviewBoard),
        (status = 400, description = "Validation error"),
        (status = 502, description = "The write or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<BoardQuery>,
    ValidatedJson(payload): ValidatedJson<ReviewReply>,
) -> AppResult<Json<ReviewBoard>> {
    let board = state
        .reviews
        .reply(id, &payload.reply, query.product_id, query.page)
        .await?;
    Ok(Json(board))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "Reviews",
    params(
        ("id" = i64, Path, description = "Review id"),
        BoardQuery
    ),
    responses(
        (status = 200, description = "Refreshed board after the delete", body = ReviewBoard),
        (status = 502, description = "The delete or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<BoardQuery>,
) -> AppResult<Json<ReviewBoard>> {
    let board = state.reviews.remove(id, query.product_id, query.page).await?;
    Ok(Json(board))
}
