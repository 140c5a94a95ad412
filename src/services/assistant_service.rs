//! Assistant service - store-aware Q&A and streamed content generation.
//!
//! The Q&A assistant grounds every answer in a snapshot of the live
//! catalog, customer list and order book, serialized into the system
//! prompt. Snapshots are capped so an oversized catalog cannot blow the
//! prompt budget; a collection that fails to load is logged and omitted
//! rather than failing the conversation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::container::parallel;
use crate::config::{
    ASSISTANT_ORDERS_SNAPSHOT_CHARS, ASSISTANT_PRODUCTS_SNAPSHOT_CHARS,
    ASSISTANT_USERS_SNAPSHOT_CHARS,
};
use crate::domain::{Product, Review};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ChatClient, ChatMessage, DataStore, TextFragments};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Answer a question about the store, grounded in live data.
    async fn ask(&self, history: Vec<ChatMessage>, question: &str) -> AppResult<String>;

    /// Stream a summary of a product's customer reviews.
    async fn summarize_reviews(&self, product_id: i64) -> AppResult<TextFragments>;

    /// Stream a search-optimized description for a product.
    async fn generate_seo(&self, product_id: i64) -> AppResult<TextFragments>;
}

pub struct Assistant {
    store: Arc<dyn DataStore>,
    chat: Arc<dyn ChatClient>,
}

impl Assistant {
    pub fn new(store: Arc<dyn DataStore>, chat: Arc<dyn ChatClient>) -> Self {
        Self { store, chat }
    }

    /// Serialize rows for the prompt, truncated to a character budget.
    fn snapshot<T: Serialize>(rows: &[T], cap: usize) -> String {
        let mut json = serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string());
        if let Some((boundary, _)) = json.char_indices().nth(cap) {
            json.truncate(boundary);
        }
        json
    }

    /// Load a collection for grounding, degrading to empty on failure.
    fn tolerate<T>(result: AppResult<Vec<T>>, collection: &str) -> Vec<T> {
        match result {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("assistant grounding skipped {collection}: {e}");
                Vec::new()
            }
        }
    }

    fn review_digest(reviews: &[Review]) -> String {
        reviews
            .iter()
            .map(|review| {
                format!(
                    "- {} stars: {}{}",
                    review.stars,
                    review.content,
                    review
                        .reply_content
                        .as_deref()
                        .map(|reply| format!(" (store reply: {reply})"))
                        .unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn product_digest(product: &Product) -> String {
        format!(
            "Name: {}\nCategory: {}\nPrice: {}\nDiscounted price: {}\nFeatures: {}\nColors: {}\nDescription: {}",
            product.name,
            product.category.as_deref().unwrap_or("Unspecified"),
            product.price,
            product.discounted_price,
            product.features.join(", "),
            product.colors.join(", "),
            product.description.as_deref().unwrap_or("None"),
        )
    }
}

#[async_trait]
impl AssistantService for Assistant {
    async fn ask(&self, history: Vec<ChatMessage>, question: &str) -> AppResult<String> {
        let (products, users, orders) = tokio::join!(
            self.store.fetch_products(),
            self.store.fetch_users(),
            self.store.fetch_orders(),
        );
        let products = Self::tolerate(products, "Products");
        let users = Self::tolerate(users, "Users");
        let orders = Self::tolerate(orders, "Orders");

        let system = format!(
            "You are the assistant of an eyewear store's admin dashboard. \
             Answer questions using only the store data below. Be concise, \
             and say so when the data does not contain the answer.\n\n\
             Products:\n{}\n\nCustomers:\n{}\n\nOrders:\n{}",
            Self::snapshot(&products, ASSISTANT_PRODUCTS_SNAPSHOT_CHARS),
            Self::snapshot(&users, ASSISTANT_USERS_SNAPSHOT_CHARS),
            Self::snapshot(&orders, ASSISTANT_ORDERS_SNAPSHOT_CHARS),
        );

        let mut messages = vec![ChatMessage::system(system)];
        messages.extend(history);
        messages.push(ChatMessage::user(question));

        self.chat.complete(&messages).await
    }

    async fn summarize_reviews(&self, product_id: i64) -> AppResult<TextFragments> {
        let (product, reviews) = parallel::join2(
            self.store.fetch_product(product_id),
            self.store.fetch_reviews(product_id),
        )
        .await?;
        let product = product.ok_or_not_found()?;

        if reviews.is_empty() {
            return Err(AppError::validation("This product has no reviews yet"));
        }

        let messages = vec![
            ChatMessage::system(
                "You summarize customer reviews for a store owner. Highlight \
                 recurring praise and complaints, and keep it under 120 words.",
            ),
            ChatMessage::user(format!(
                "Summarize the reviews of \"{}\":\n{}",
                product.name,
                Self::review_digest(&reviews),
            )),
        ];

        self.chat.stream(&messages).await
    }

    async fn generate_seo(&self, product_id: i64) -> AppResult<TextFragments> {
        let product = self
            .store
            .fetch_product(product_id)
            .await?
            .ok_or_not_found()?;

        let messages = vec![
            ChatMessage::system(
                "You write product descriptions for an eyewear web store. \
                 Write naturally for shoppers while working in search terms; \
                 no headings, one paragraph of at most 90 words.",
            ),
            ChatMessage::user(format!(
                "Write a description for this product:\n{}",
                Self::product_digest(&product),
            )),
        ];

        self.chat.stream(&messages).await
    }
}
