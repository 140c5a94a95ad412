//! Product catalog handlers.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewProduct, Product, UpdateProduct};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, ListQuery, PageView};

/// Upload parameters for a product image
#[derive(Debug, Deserialize, IntoParams)]
pub struct ImageUploadQuery {
    /// Original filename, kept in the stored object path
    pub filename: String,
}

/// Identifies the image to remove
#[derive(Debug, Deserialize, IntoParams)]
pub struct ImageDeleteQuery {
    /// Public URL of the attached image
    pub url: String,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(fetch).put(update).delete(remove))
        .route("/:id/images", post(upload_image).delete(remove_image))
}

/// List the catalog
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 502, description = "The catalog failed to load")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PageView<Product>>> {
    let page = state.products.list(query).await?;
    Ok(Json(page))
}

/// Fetch one product
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = state.products.get(id).await?;
    Ok(Json(product))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewProduct>,
) -> AppResult<Created<Product>> {
    let product = state.products.create(payload).await?;
    Ok(Created(product))
}

/// Edit a product; absent fields are left untouched
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "The updated product", body = Product),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let product = state.products.update(id, payload).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Refreshed page after the delete", body = ProductPage),
        (status = 502, description = "The delete or the refetch failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PageView<Product>>> {
    let page = state.products.remove(id, query).await?;
    Ok(Json(page))
}

/// Upload a product image and append its public URL
#[utoipa::path(
    post,
    path = "/products/{id}/images",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id"),
        ImageUploadQuery
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "The product with the new image", body = Product),
        (status = 400, description = "Missing content type or empty body"),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ImageUploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Product>> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::validation("Content-Type header is required"))?;

    if body.is_empty() {
        return Err(AppError::validation("Image body is empty"));
    }

    let product = state
        .products
        .attach_image(id, &query.filename, body.to_vec(), content_type)
        .await?;
    Ok(Json(product))
}

/// Remove a product image: delete the blob and strip its URL
#[utoipa::path(
    delete,
    path = "/products/{id}/images",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id"),
        ImageDeleteQuery
    ),
    responses(
        (status = 200, description = "The product without the image", body = Product),
        (status = 400, description = "The image is not attached to the product"),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ImageDeleteQuery>,
) -> AppResult<Json<Product>> {
    let product = state.products.detach_image(id, &query.url).await?;
    Ok(Json(product))
}
