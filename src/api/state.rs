//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and gateways.

use std::sync::Arc;

use crate::infra::{AuthProvider, DataStore};
use crate::services::{
    AssistantService, CustomerService, DashboardService, OrderService, ProductService,
    ReviewService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<dyn DashboardService>,
    pub customers: Arc<dyn CustomerService>,
    pub orders: Arc<dyn OrderService>,
    pub products: Arc<dyn ProductService>,
    pub reviews: Arc<dyn ReviewService>,
    pub assistant: Arc<dyn AssistantService>,
    pub auth: Arc<dyn AuthProvider>,
    /// Raw store access, for liveness probing only
    pub store: Arc<dyn DataStore>,
}

impl AppState {
    /// Create application state with the full service graph wired from
    /// configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let container = Services::from_config(config);

        Self {
            dashboard: container.dashboard(),
            customers: container.customers(),
            orders: container.orders(),
            products: container.products(),
            reviews: container.reviews(),
            assistant: container.assistant(),
            auth: container.auth(),
            store: container.store(),
        }
    }

    /// Create application state with manually injected services.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dashboard: Arc<dyn DashboardService>,
        customers: Arc<dyn CustomerService>,
        orders: Arc<dyn OrderService>,
        products: Arc<dyn ProductService>,
        reviews: Arc<dyn ReviewService>,
        assistant: Arc<dyn AssistantService>,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DataStore>,
    ) -> Self {
        Self {
            dashboard,
            customers,
            orders,
            products,
            reviews,
            assistant,
            auth,
            store,
        }
    }
}
