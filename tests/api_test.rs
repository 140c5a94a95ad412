//! Integration tests for API endpoints.
//!
//! These tests drive the full router with mock services, so routing,
//! session checks, extractors and error mapping are exercised without a
//! remote store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use storefront_admin::api::{create_router, AppState};
use storefront_admin::domain::{CustomerRow, OrderStatus};
use storefront_admin::errors::AppError;
use storefront_admin::infra::{
    MockAuthProvider, MockDataStore, Session, SessionUser,
};
use storefront_admin::services::{
    MockAssistantService, MockCustomerService, MockDashboardService, MockOrderService,
    MockProductService, MockReviewService,
};
use storefront_admin::types::PageView;

/// Auth provider that accepts the token "valid-test-token".
fn accepting_auth() -> MockAuthProvider {
    let mut auth = MockAuthProvider::new();
    auth.expect_session().returning(|token| {
        if token == "valid-test-token" {
            Ok(SessionUser {
                id: "admin-1".to_string(),
                email: Some("owner@example.com".to_string()),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    });
    auth
}

struct StateBuilder {
    dashboard: MockDashboardService,
    customers: MockCustomerService,
    orders: MockOrderService,
    products: MockProductService,
    reviews: MockReviewService,
    assistant: MockAssistantService,
    auth: MockAuthProvider,
    store: MockDataStore,
}

impl StateBuilder {
    fn new() -> Self {
        Self {
            dashboard: MockDashboardService::new(),
            customers: MockCustomerService::new(),
            orders: MockOrderService::new(),
            products: MockProductService::new(),
            reviews: MockReviewService::new(),
            assistant: MockAssistantService::new(),
            auth: accepting_auth(),
            store: MockDataStore::new(),
        }
    }

    fn build(self) -> AppState {
        AppState::new(
            Arc::new(self.dashboard),
            Arc::new(self.customers),
            Arc::new(self.orders),
            Arc::new(self.products),
            Arc::new(self.reviews),
            Arc::new(self.assistant),
            Arc::new(self.auth),
            Arc::new(self.store),
        )
    }
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header(header::AUTHORIZATION, "Bearer valid-test-token")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn protected_routes_reject_requests_without_a_session() {
    let app = create_router(StateBuilder::new().build());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/customers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn login_issues_a_session() {
    let mut builder = StateBuilder::new();
    builder.auth = MockAuthProvider::new();
    builder.auth.expect_sign_in().returning(|email, _| {
        Ok(Session {
            access_token: "token-123".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            refresh_token: "refresh-123".to_string(),
            user: SessionUser {
                id: "admin-1".to_string(),
                email: Some(email.to_string()),
            },
        })
    });
    let app = create_router(builder.build());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"owner@example.com","password":"secret"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["access_token"], "token-123");
}

#[tokio::test]
async fn login_rejects_a_malformed_email() {
    let app = create_router(StateBuilder::new().build());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"not-an-email","password":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn customer_listing_passes_search_and_page_through() {
    let mut builder = StateBuilder::new();
    builder.customers.expect_list().returning(|query| {
        assert_eq!(query.q.as_deref(), Some("ada"));
        assert_eq!(query.page, 2);
        Ok(PageView::paginate(
            vec![CustomerRow {
                id: "u1".to_string(),
                name: Some("Ada".to_string()),
                email: "ada@example.com".to_string(),
                created_at: Utc::now(),
                total_spend: dec!(120),
            }],
            1,
            5,
        ))
    });
    let app = create_router(builder.build());

    let response = app
        .oneshot(
            authed(Request::builder().uri("/customers?q=ada&page=2"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["email"], "ada@example.com");
}

#[tokio::test]
async fn order_status_change_returns_the_refreshed_page() {
    let mut builder = StateBuilder::new();
    builder
        .orders
        .expect_set_shipping_status()
        .returning(|id, status, _| {
            assert_eq!(id, 7);
            assert_eq!(status, OrderStatus::Shipped);
            Ok(PageView::paginate(Vec::new(), 1, 5))
        });
    let app = create_router(builder.build());

    let response = app
        .oneshot(
            authed(
                Request::builder()
                    .method("PUT")
                    .uri("/orders/7/status")
                    .header(header::CONTENT_TYPE, "application/json"),
            )
            .body(Body::from(r#"{"status":"Shipped"}"#))
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_review_reply_is_rejected_before_the_service_runs() {
    let app = create_router(StateBuilder::new().build());

    let response = app
        .oneshot(
            authed(
                Request::builder()
                    .method("POST")
                    .uri("/reviews/3/reply?product_id=1&page=1")
                    .header(header::CONTENT_TYPE, "application/json"),
            )
            .body(Body::from(r#"{"reply":""}"#))
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failed_collection_read_maps_to_bad_gateway() {
    let mut builder = StateBuilder::new();
    builder
        .orders
        .expect_list()
        .returning(|_| Err(AppError::fetch("Payments", "timeout")));
    let app = create_router(builder.build());

    let response = app
        .oneshot(
            authed(Request::builder().uri("/orders"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FETCH_ERROR");
}

#[tokio::test]
async fn health_reports_degraded_when_the_store_is_down() {
    let mut builder = StateBuilder::new();
    builder
        .store
        .expect_count()
        .returning(|_| Err(AppError::fetch("Users", "connection refused")));
    let app = create_router(builder.build());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
}
