//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    assistant_handler, auth_handler, customer_handler, dashboard_handler, order_handler,
    product_handler, review_handler,
};
use crate::domain::{
    CustomerRow, DashboardStats, NewProduct, OrderStatus, OrderView, PaymentStatus, Product,
    ReviewReply, ReviewView, UpdateProduct, UpdateProfile,
};
use crate::infra::{ChatMessage, Credentials, PasswordChange, Session, SessionUser};
use crate::services::ReviewBoard;
use crate::types::listing::{CustomerPage, OrderPage, ProductPage, ReviewPage};
use crate::types::MessageResponse;

/// OpenAPI documentation for the Storefront Admin API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Admin API",
        version = "0.1.0",
        description = "Admin dashboard backend for a hosted eyewear storefront",
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication and account
        auth_handler::login,
        auth_handler::change_password,
        auth_handler::update_profile,
        // Dashboard
        dashboard_handler::stats,
        // Customers
        customer_handler::list,
        customer_handler::remove,
        // Orders
        order_handler::list,
        order_handler::set_status,
        order_handler::set_payment_status,
        order_handler::remove,
        // Products
        product_handler::list,
        product_handler::fetch,
        product_handler::create,
        product_handler::update,
        product_handler::remove,
        product_handler::upload_image,
        product_handler::remove_image,
        // Reviews
        review_handler::list,
        review_handler::reply,
        review_handler::remove,
        // Assistant
        assistant_handler::ask,
        assistant_handler::summarize_reviews,
        assistant_handler::generate_seo,
    ),
    components(
        schemas(
            // Domain types
            OrderStatus,
            PaymentStatus,
            Product,
            NewProduct,
            UpdateProduct,
            UpdateProfile,
            ReviewReply,
            // Derived views
            CustomerRow,
            OrderView,
            ReviewView,
            DashboardStats,
            ReviewBoard,
            CustomerPage,
            OrderPage,
            ProductPage,
            ReviewPage,
            // Auth types
            Credentials,
            PasswordChange,
            Session,
            SessionUser,
            // Assistant types
            ChatMessage,
            assistant_handler::AskRequest,
            assistant_handler::AskResponse,
            // Shared
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session issuance"),
        (name = "Account", description = "Signed-in account settings"),
        (name = "Dashboard", description = "Headline store figures"),
        (name = "Customers", description = "Customer listing and removal"),
        (name = "Orders", description = "Order listing and status changes"),
        (name = "Products", description = "Catalog management"),
        (name = "Reviews", description = "Review boards and owner replies"),
        (name = "Assistant", description = "Store-aware Q&A and content generation")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for session Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
