//! HTTP request handlers.

pub mod assistant_handler;
pub mod auth_handler;
pub mod customer_handler;
pub mod dashboard_handler;
pub mod order_handler;
pub mod product_handler;
pub mod review_handler;

pub use assistant_handler::{assistant_routes, enhancer_routes};
pub use auth_handler::{account_routes, auth_routes};
pub use customer_handler::customer_routes;
pub use dashboard_handler::dashboard_routes;
pub use order_handler::{order_routes, payment_routes};
pub use product_handler::product_routes;
pub use review_handler::{product_review_routes, review_routes};
