//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    account_routes, assistant_routes, auth_routes, customer_routes, dashboard_routes,
    enhancer_routes, order_routes, payment_routes, product_review_routes, product_routes,
    review_routes,
};
use super::middleware::session_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::infra::Collection;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Everything except login and the health probes requires a session.
    let protected = Router::new()
        .nest("/dashboard", dashboard_routes())
        .nest("/customers", customer_routes())
        .nest("/orders", order_routes())
        .nest("/payments", payment_routes())
        .nest(
            "/products",
            product_routes()
                .merge(enhancer_routes())
                .merge(product_review_routes()),
        )
        .nest("/reviews", review_routes())
        .nest("/assistant", assistant_routes())
        .nest("/account", account_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", auth_routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Storefront Admin API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: ServiceStatus,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint probing the remote store
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_status = match state.store.count(Collection::Users).await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = store_status.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        store: store_status,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
