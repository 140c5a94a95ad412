//! Customer service - the customers screen and account profile edits.

use std::sync::Arc;

use async_trait::async_trait;

use super::container::parallel;
use crate::config::CUSTOMERS_PAGE_SIZE;
use crate::domain::{aggregate, CustomerRow, UpdateProfile};
use crate::errors::AppResult;
use crate::infra::DataStore;
use crate::types::{filter_paginate, ListQuery, PageView};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// One page of customers with lifetime spend, filtered by name/email.
    async fn list(&self, query: ListQuery) -> AppResult<PageView<CustomerRow>>;

    /// Delete an account, then serve the refreshed page the caller was on.
    async fn remove(&self, user_id: &str, query: ListQuery) -> AppResult<PageView<CustomerRow>>;

    async fn update_profile(&self, user_id: &str, patch: UpdateProfile) -> AppResult<()>;
}

pub struct CustomerManager {
    store: Arc<dyn DataStore>,
}

impl CustomerManager {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CustomerService for CustomerManager {
    async fn list(&self, query: ListQuery) -> AppResult<PageView<CustomerRow>> {
        let (users, orders) =
            parallel::join2(self.store.fetch_users(), self.store.fetch_orders()).await?;

        let rows = aggregate::merge_customers(&users, &orders);
        Ok(filter_paginate(
            rows,
            query.q.as_deref(),
            query.page,
            CUSTOMERS_PAGE_SIZE,
        ))
    }

    async fn remove(&self, user_id: &str, query: ListQuery) -> AppResult<PageView<CustomerRow>> {
        self.store.delete_user(user_id).await?;
        self.list(query).await
    }

    async fn update_profile(&self, user_id: &str, patch: UpdateProfile) -> AppResult<()> {
        self.store.update_profile(user_id, &patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderStatus, User};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn user(id: &str, name: &str, email: &str) -> User {
        User {
            user_id: id.to_string(),
            name: Some(name.to_string()),
            email: email.to_string(),
            address: None,
            phone: None,
            role: None,
            created_at: Utc::now(),
        }
    }

    fn completed_order(id: i64, user: &str, amount: rust_decimal::Decimal) -> Order {
        Order {
            id,
            user_id: user.to_string(),
            total_amount: amount,
            status: OrderStatus::Completed,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_merges_spend_per_customer() {
        let mut store = crate::infra::MockDataStore::new();
        store.expect_fetch_users().returning(|| {
            Ok(vec![
                user("u1", "Ada", "ada@example.com"),
                user("u2", "Grace", "grace@example.com"),
            ])
        });
        store.expect_fetch_orders().returning(|| {
            Ok(vec![
                completed_order(1, "u1", dec!(40)),
                completed_order(2, "u1", dec!(60)),
            ])
        });

        let page = CustomerManager::new(Arc::new(store))
            .list(ListQuery::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let ada = page.data.iter().find(|c| c.id == "u1").unwrap();
        assert_eq!(ada.total_spend, dec!(100));
        let grace = page.data.iter().find(|c| c.id == "u2").unwrap();
        assert_eq!(grace.total_spend, dec!(0));
    }

    #[tokio::test]
    async fn test_remove_refetches_the_listing() {
        let mut store = crate::infra::MockDataStore::new();
        store
            .expect_delete_user()
            .with(eq("u2"))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_fetch_users()
            .returning(|| Ok(vec![user("u1", "Ada", "ada@example.com")]));
        store.expect_fetch_orders().returning(|| Ok(vec![]));

        let page = CustomerManager::new(Arc::new(store))
            .remove("u2", ListQuery::default())
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, "u1");
    }
}
