//! Order service - the orders screen and its status mutations.
//!
//! Every mutation is fire-and-confirm: the write goes through first,
//! then the whole listing is refetched and merged again so the caller
//! receives the page exactly as a fresh load would render it. That
//! refetch is also what clamps the page number after a delete empties
//! the last page.

use std::sync::Arc;

use async_trait::async_trait;

use super::container::parallel;
use crate::config::ORDERS_PAGE_SIZE;
use crate::domain::{aggregate, OrderStatus, OrderView, PaymentStatus};
use crate::errors::AppResult;
use crate::infra::DataStore;
use crate::types::{filter_paginate, ListQuery, PageView};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// One page of orders joined with their customer and payment.
    async fn list(&self, query: ListQuery) -> AppResult<PageView<OrderView>>;

    async fn set_shipping_status(
        &self,
        id: i64,
        status: OrderStatus,
        query: ListQuery,
    ) -> AppResult<PageView<OrderView>>;

    async fn set_payment_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        query: ListQuery,
    ) -> AppResult<PageView<OrderView>>;

    async fn remove(&self, id: i64, query: ListQuery) -> AppResult<PageView<OrderView>>;
}

pub struct OrderManager {
    store: Arc<dyn DataStore>,
}

impl OrderManager {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn list(&self, query: ListQuery) -> AppResult<PageView<OrderView>> {
        let (orders, users, payments) = parallel::join3(
            self.store.fetch_orders(),
            self.store.fetch_users(),
            self.store.fetch_payments(),
        )
        .await?;

        let views = aggregate::merge_orders(&orders, &users, &payments);
        Ok(filter_paginate(
            views,
            query.q.as_deref(),
            query.page,
            ORDERS_PAGE_SIZE,
        ))
    }

    async fn set_shipping_status(
        &self,
        id: i64,
        status: OrderStatus,
        query: ListQuery,
    ) -> AppResult<PageView<OrderView>> {
        self.store.update_order_status(id, status).await?;
        self.list(query).await
    }

    async fn set_payment_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        query: ListQuery,
    ) -> AppResult<PageView<OrderView>> {
        self.store.update_payment_status(payment_id, status).await?;
        self.list(query).await
    }

    async fn remove(&self, id: i64, query: ListQuery) -> AppResult<PageView<OrderView>> {
        self.store.delete_order(id).await?;
        self.list(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UNKNOWN_ADDRESS, UNKNOWN_USER_NAME};
    use crate::domain::{Order, Payment, User};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn order(id: i64, user: &str) -> Order {
        Order {
            id,
            user_id: user.to_string(),
            total_amount: dec!(10),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn user(id: &str, name: &str) -> User {
        User {
            user_id: id.to_string(),
            name: Some(name.to_string()),
            email: format!("{name}@example.com"),
            address: Some("12 High St".to_string()),
            phone: None,
            role: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_fills_defaults_for_unmatched_rows() {
        let mut store = crate::infra::MockDataStore::new();
        store
            .expect_fetch_orders()
            .returning(|| Ok(vec![order(1, "ghost")]));
        store
            .expect_fetch_users()
            .returning(|| Ok(vec![user("u1", "ada")]));
        store.expect_fetch_payments().returning(|| Ok(vec![]));

        let page = OrderManager::new(Arc::new(store))
            .list(ListQuery::default())
            .await
            .unwrap();

        let view = &page.data[0];
        assert_eq!(view.user_name, UNKNOWN_USER_NAME);
        assert_eq!(view.shipping_address, UNKNOWN_ADDRESS);
        assert_eq!(view.payment_status, crate::domain::PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_status_change_serves_the_refreshed_listing() {
        let mut store = crate::infra::MockDataStore::new();
        store
            .expect_update_order_status()
            .with(eq(1), eq(OrderStatus::Shipped))
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_fetch_orders().returning(|| {
            Ok(vec![Order {
                status: OrderStatus::Shipped,
                ..order(1, "u1")
            }])
        });
        store
            .expect_fetch_users()
            .returning(|| Ok(vec![user("u1", "ada")]));
        store.expect_fetch_payments().returning(|| Ok(vec![]));

        let page = OrderManager::new(Arc::new(store))
            .set_shipping_status(1, OrderStatus::Shipped, ListQuery::default())
            .await
            .unwrap();

        assert_eq!(page.data[0].status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_remove_clamps_the_requested_page() {
        // 6 orders fill two pages of 5; deleting one leaves a single page,
        // so a request for page 2 is served from page 1.
        let mut store = crate::infra::MockDataStore::new();
        store.expect_delete_order().returning(|_| Ok(()));
        store
            .expect_fetch_orders()
            .returning(|| Ok((1..=5).map(|id| order(id, "u1")).collect()));
        store
            .expect_fetch_users()
            .returning(|| Ok(vec![user("u1", "ada")]));
        store.expect_fetch_payments().returning(|| Ok(vec![]));

        let page = OrderManager::new(Arc::new(store))
            .remove(6, ListQuery { q: None, page: 2 })
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.data.len(), 5);
    }
}
