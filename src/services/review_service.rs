//! Review service - the per-product review board with owner replies.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::container::parallel;
use crate::config::REVIEWS_PAGE_SIZE;
use crate::domain::{aggregate, ReviewView};
use crate::errors::AppResult;
use crate::infra::DataStore;
use crate::types::PageView;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One product's reviews with the headline rating.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewBoard {
    pub reviews: PageView<ReviewView>,
    /// Mean star rating across all reviews, absent when there are none
    pub average_stars: Option<f64>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// One page of a product's reviews, newest first.
    async fn list_for_product(&self, product_id: i64, page: u64) -> AppResult<ReviewBoard>;

    /// Store an owner reply, then serve the refreshed board.
    async fn reply(
        &self,
        review_id: i64,
        reply: &str,
        product_id: i64,
        page: u64,
    ) -> AppResult<ReviewBoard>;

    async fn remove(&self, review_id: i64, product_id: i64, page: u64) -> AppResult<ReviewBoard>;
}

pub struct ReviewManager {
    store: Arc<dyn DataStore>,
}

impl ReviewManager {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn list_for_product(&self, product_id: i64, page: u64) -> AppResult<ReviewBoard> {
        let (reviews, users) = parallel::join2(
            self.store.fetch_reviews(product_id),
            self.store.fetch_users(),
        )
        .await?;

        let average_stars = aggregate::average_stars(&reviews);
        let views = aggregate::merge_reviews(&reviews, &users);

        Ok(ReviewBoard {
            reviews: PageView::paginate(views, page, REVIEWS_PAGE_SIZE),
            average_stars,
        })
    }

    async fn reply(
        &self,
        review_id: i64,
        reply: &str,
        product_id: i64,
        page: u64,
    ) -> AppResult<ReviewBoard> {
        self.store.reply_to_review(review_id, reply).await?;
        self.list_for_product(product_id, page).await
    }

    async fn remove(&self, review_id: i64, product_id: i64, page: u64) -> AppResult<ReviewBoard> {
        self.store.delete_review(review_id).await?;
        self.list_for_product(product_id, page).await
    }
}
