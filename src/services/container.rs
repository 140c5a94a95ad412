//! Service container - centralized service access with parallel fetch support.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::future::Future;
use std::sync::Arc;

use super::{
    AssistantService, CustomerService, DashboardService, OrderService, ProductService,
    ReviewService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{AuthProvider, DataStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn dashboard(&self) -> Arc<dyn DashboardService>;

    fn customers(&self) -> Arc<dyn CustomerService>;

    fn orders(&self) -> Arc<dyn OrderService>;

    fn products(&self) -> Arc<dyn ProductService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;

    fn assistant(&self) -> Arc<dyn AssistantService>;

    fn auth(&self) -> Arc<dyn AuthProvider>;

    /// Raw store access, for liveness probing only.
    fn store(&self) -> Arc<dyn DataStore>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    dashboard_service: Arc<dyn DashboardService>,
    customer_service: Arc<dyn CustomerService>,
    order_service: Arc<dyn OrderService>,
    product_service: Arc<dyn ProductService>,
    review_service: Arc<dyn ReviewService>,
    assistant_service: Arc<dyn AssistantService>,
    auth_provider: Arc<dyn AuthProvider>,
    data_store: Arc<dyn DataStore>,
}

impl Services {
    /// Wire the whole graph from configuration.
    pub fn from_config(config: &Config) -> Self {
        use super::{
            Assistant, CustomerManager, DashboardManager, OrderManager, ProductManager,
            ReviewManager,
        };
        use crate::infra::{AuthGateway, BucketStorage, ChatGateway, RestStore};

        let store: Arc<dyn DataStore> = Arc::new(RestStore::new(config));
        let storage = Arc::new(BucketStorage::new(config));
        let chat = Arc::new(ChatGateway::new(config));
        let auth: Arc<dyn AuthProvider> = Arc::new(AuthGateway::new(config));

        Self {
            dashboard_service: Arc::new(DashboardManager::new(store.clone())),
            customer_service: Arc::new(CustomerManager::new(store.clone())),
            order_service: Arc::new(OrderManager::new(store.clone())),
            product_service: Arc::new(ProductManager::new(store.clone(), storage)),
            review_service: Arc::new(ReviewManager::new(store.clone())),
            assistant_service: Arc::new(Assistant::new(store.clone(), chat)),
            auth_provider: auth,
            data_store: store,
        }
    }
}

impl ServiceContainer for Services {
    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }

    fn customers(&self) -> Arc<dyn CustomerService> {
        self.customer_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn assistant(&self) -> Arc<dyn AssistantService> {
        self.assistant_service.clone()
    }

    fn auth(&self) -> Arc<dyn AuthProvider> {
        self.auth_provider.clone()
    }

    fn store(&self) -> Arc<dyn DataStore> {
        self.data_store.clone()
    }
}

/// Parallel fetch utilities.
///
/// Every listing runs one fetch cycle: all source collections are read
/// concurrently and the cycle fails as a whole on the first error, so a
/// page never renders from a partial data set.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute five independent async operations in parallel.
    pub async fn join5<F1, F2, F3, F4, F5, T1, T2, T3, T4, T5>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
        f5: F5,
    ) -> AppResult<(T1, T2, T3, T4, T5)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
        F5: Future<Output = AppResult<T5>>,
    {
        try_join!(f1, f2, f3, f4, f5)
    }
}
