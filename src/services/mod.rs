//! Service layer - one manager per dashboard screen, behind traits.
//!
//! Handlers depend on the traits only; the container wires the concrete
//! managers to the infrastructure gateways.

pub mod assistant_service;
pub mod container;
pub mod customer_service;
pub mod dashboard_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;

pub use assistant_service::{Assistant, AssistantService};
pub use container::{parallel, ServiceContainer, Services};
pub use customer_service::{CustomerManager, CustomerService};
pub use dashboard_service::{DashboardManager, DashboardService};
pub use order_service::{OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService};
pub use review_service::{ReviewBoard, ReviewManager, ReviewService};

#[cfg(any(test, feature = "test-utils"))]
pub use assistant_service::MockAssistantService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use customer_service::MockCustomerService;
#[cfg(any(test, feature = "test-utils"))]
pub use dashboard_service::MockDashboardService;
#[cfg(any(test, feature = "test-utils"))]
pub use order_service::MockOrderService;
#[cfg(any(test, feature = "test-utils"))]
pub use product_service::MockProductService;
#[cfg(any(test, feature = "test-utils"))]
pub use review_service::MockReviewService;
