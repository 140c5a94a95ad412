//! Dashboard service - headline figures for the landing screen.

use std::sync::Arc;

use async_trait::async_trait;

use super::container::parallel;
use crate::domain::{aggregate, DashboardStats};
use crate::errors::AppResult;
use crate::infra::{Collection, DataStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Compute the stat cards in one fetch cycle.
    async fn stats(&self) -> AppResult<DashboardStats>;
}

pub struct DashboardManager {
    store: Arc<dyn DataStore>,
}

impl DashboardManager {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DashboardService for DashboardManager {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let (customers, products, order_count, orders, payments) = parallel::join5(
            self.store.count(Collection::Users),
            self.store.count(Collection::Products),
            self.store.count(Collection::Orders),
            self.store.fetch_orders(),
            self.store.fetch_payments(),
        )
        .await?;

        Ok(DashboardStats {
            total_sales: aggregate::total_sales(&orders, &payments),
            total_orders: order_count,
            total_products: products,
            total_customers: customers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderStatus, Payment, PaymentStatus};
    use crate::errors::AppError;
    use crate::infra::MockDataStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order(id: i64, user: &str, amount: rust_decimal::Decimal, status: OrderStatus) -> Order {
        Order {
            id,
            user_id: user.to_string(),
            total_amount: amount,
            status,
            created_at: Utc::now(),
        }
    }

    fn payment(id: &str, order_id: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: id.to_string(),
            order_id,
            status,
            payment_method: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_stats_counts_only_completed_and_paid_sales() {
        let mut store = MockDataStore::new();
        store
            .expect_count()
            .returning(|c| match c {
                Collection::Users => Ok(7),
                Collection::Products => Ok(12),
                Collection::Orders => Ok(3),
                _ => Ok(0),
            });
        store.expect_fetch_orders().returning(|| {
            Ok(vec![
                order(1, "u1", dec!(100), OrderStatus::Completed),
                order(2, "u1", dec!(50), OrderStatus::Completed),
                order(3, "u2", dec!(75), OrderStatus::Pending),
            ])
        });
        store.expect_fetch_payments().returning(|| {
            Ok(vec![
                payment("p1", 1, PaymentStatus::Paid),
                payment("p2", 2, PaymentStatus::Pending),
                payment("p3", 3, PaymentStatus::Paid),
            ])
        });

        let stats = DashboardManager::new(Arc::new(store)).stats().await.unwrap();

        assert_eq!(stats.total_sales, dec!(100));
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_products, 12);
        assert_eq!(stats.total_customers, 7);
    }

    #[tokio::test]
    async fn test_stats_fails_when_any_source_fails() {
        let mut store = MockDataStore::new();
        store.expect_count().returning(|_| Ok(1));
        store
            .expect_fetch_orders()
            .returning(|| Err(AppError::fetch("Orders", "timeout")));
        store.expect_fetch_payments().returning(|| Ok(vec![]));

        let result = DashboardManager::new(Arc::new(store)).stats().await;
        assert!(matches!(result, Err(AppError::Fetch { .. })));
    }
}
