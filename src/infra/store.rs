//! Remote data store gateway.
//!
//! The hosted store exposes a row-oriented REST dialect: `GET
//! /{table}?select=…&column=eq.value` for reads, `HEAD` with
//! `Prefer: count=exact` for count-only queries, `POST`/`PATCH`/`DELETE`
//! with equality filters for writes. There are no retries and no caching;
//! a failed read surfaces immediately and the caller treats the
//! collection as empty for that cycle.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, STORE_API_KEY_HEADER};
use crate::domain::{
    NewProduct, Order, OrderStatus, Payment, PaymentStatus, Product, Review, UpdateProduct,
    UpdateProfile, User,
};
use crate::errors::{AppError, AppResult};

/// Named collections of the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Orders,
    Payments,
    Products,
    Reviews,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Orders => "Orders",
            Collection::Payments => "Payments",
            Collection::Products => "Products",
            Collection::Reviews => "Reviews",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// Remote data store operations the dashboard performs.
///
/// Reads return the full matching row set; counts never transfer row
/// payloads. Writes are fire-and-confirm: callers follow a confirmed
/// mutation with a full refetch cycle rather than patching locally.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn fetch_users(&self) -> AppResult<Vec<User>>;

    /// All orders, newest first.
    async fn fetch_orders(&self) -> AppResult<Vec<Order>>;

    async fn fetch_payments(&self) -> AppResult<Vec<Payment>>;

    async fn fetch_products(&self) -> AppResult<Vec<Product>>;

    async fn fetch_product(&self, id: i64) -> AppResult<Option<Product>>;

    /// Reviews of one product, newest first.
    async fn fetch_reviews(&self, product_id: i64) -> AppResult<Vec<Review>>;

    /// Row count of a collection, without transferring rows.
    async fn count(&self, collection: Collection) -> AppResult<u64>;

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> AppResult<()>;

    async fn update_payment_status(&self, id: &str, status: PaymentStatus) -> AppResult<()>;

    async fn reply_to_review(&self, id: i64, reply: &str) -> AppResult<()>;

    async fn insert_product(&self, product: &NewProduct) -> AppResult<Product>;

    async fn update_product(&self, id: i64, patch: &UpdateProduct) -> AppResult<Product>;

    async fn update_profile(&self, user_id: &str, patch: &UpdateProfile) -> AppResult<()>;

    async fn delete_order(&self, id: i64) -> AppResult<()>;

    async fn delete_product(&self, id: i64) -> AppResult<()>;

    async fn delete_review(&self, id: i64) -> AppResult<()>;

    async fn delete_user(&self, user_id: &str) -> AppResult<()>;
}

/// HTTP implementation of [`DataStore`].
pub struct RestStore {
    http: Client,
    endpoint: String,
}

impl RestStore {
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.store_api_key())
            .expect("store API key contains invalid header characters");
        headers.insert(STORE_API_KEY_HEADER, key);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.store_api_key()))
            .expect("store API key contains invalid header characters");
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: config.rest_endpoint(),
        }
    }

    fn request(&self, method: Method, collection: Collection) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.endpoint, collection.table()))
    }

    /// Read rows, failing with a fetch error carrying the remote message.
    async fn select<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        let response = self
            .request(Method::GET, collection)
            .query(&[("select", "*")])
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::fetch(collection.table(), e.to_string()))?;

        let response = Self::check(response, || {
            AppError::fetch(collection.table(), String::new())
        })
        .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::fetch(collection.table(), e.to_string()))
    }

    /// Mutate rows matched by an equality filter.
    async fn mutate(
        &self,
        collection: Collection,
        filter: (&str, &str),
        body: &impl Serialize,
    ) -> AppResult<()> {
        let response = self
            .request(Method::PATCH, collection)
            .query(&[filter])
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::write(collection.table(), e.to_string()))?;

        Self::check(response, || {
            AppError::write(collection.table(), String::new())
        })
        .await?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, filter: (&str, &str)) -> AppResult<()> {
        let response = self
            .request(Method::DELETE, collection)
            .query(&[filter])
            .send()
            .await
            .map_err(|e| AppError::write(collection.table(), e.to_string()))?;

        Self::check(response, || {
            AppError::write(collection.table(), String::new())
        })
        .await?;
        Ok(())
    }

    /// Turn a non-success response into an error carrying the remote body.
    async fn check(
        response: Response,
        template: impl Fn() -> AppError,
    ) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        let message = if message.is_empty() {
            status.to_string()
        } else {
            message
        };

        Err(match template() {
            AppError::Fetch { collection, .. } => AppError::fetch(collection, message),
            AppError::Write { collection, .. } => AppError::write(collection, message),
            other => other,
        })
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn fetch_users(&self) -> AppResult<Vec<User>> {
        self.select(Collection::Users, &[]).await
    }

    async fn fetch_orders(&self) -> AppResult<Vec<Order>> {
        self.select(Collection::Orders, &[("order", "created_at.desc")])
            .await
    }

    async fn fetch_payments(&self) -> AppResult<Vec<Payment>> {
        self.select(Collection::Payments, &[]).await
    }

    async fn fetch_products(&self) -> AppResult<Vec<Product>> {
        self.select(Collection::Products, &[]).await
    }

    async fn fetch_product(&self, id: i64) -> AppResult<Option<Product>> {
        let id = format!("eq.{id}");
        let rows: Vec<Product> = self.select(Collection::Products, &[("id", &id)]).await?;
        Ok(rows.into_iter().next())
    }

    async fn fetch_reviews(&self, product_id: i64) -> AppResult<Vec<Review>> {
        let product = format!("eq.{product_id}");
        self.select(
            Collection::Reviews,
            &[("product_id", &product), ("order", "created_at.desc")],
        )
        .await
    }

    async fn count(&self, collection: Collection) -> AppResult<u64> {
        let response = self
            .request(Method::HEAD, collection)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| AppError::fetch(collection.table(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::fetch(
                collection.table(),
                response.status().to_string(),
            ));
        }

        // Content-Range arrives as "0-24/3573" or "*/3573".
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|total| total.parse().ok())
            .ok_or_else(|| {
                AppError::fetch(collection.table(), "missing count in Content-Range")
            })
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> AppResult<()> {
        let id = format!("eq.{id}");
        self.mutate(
            Collection::Orders,
            ("id", &id),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn update_payment_status(&self, id: &str, status: PaymentStatus) -> AppResult<()> {
        let id = format!("eq.{id}");
        self.mutate(
            Collection::Payments,
            ("id", &id),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn reply_to_review(&self, id: i64, reply: &str) -> AppResult<()> {
        let id = format!("eq.{id}");
        self.mutate(
            Collection::Reviews,
            ("id", &id),
            &serde_json::json!({ "reply_content": reply }),
        )
        .await
    }

    async fn insert_product(&self, product: &NewProduct) -> AppResult<Product> {
        let response = self
            .request(Method::POST, Collection::Products)
            .header("Prefer", "return=representation")
            .json(product)
            .send()
            .await
            .map_err(|e| AppError::write(Collection::Products.table(), e.to_string()))?;

        let response = Self::check(response, || {
            AppError::write(Collection::Products.table(), String::new())
        })
        .await?;

        let mut rows: Vec<Product> = response
            .json()
            .await
            .map_err(|e| AppError::write(Collection::Products.table(), e.to_string()))?;
        rows.pop()
            .ok_or_else(|| AppError::write(Collection::Products.table(), "no row returned"))
    }

    async fn update_product(&self, id: i64, patch: &UpdateProduct) -> AppResult<Product> {
        let filter = format!("eq.{id}");
        let response = self
            .request(Method::PATCH, Collection::Products)
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(|e| AppError::write(Collection::Products.table(), e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }

        let response = Self::check(response, || {
            AppError::write(Collection::Products.table(), String::new())
        })
        .await?;

        let mut rows: Vec<Product> = response
            .json()
            .await
            .map_err(|e| AppError::write(Collection::Products.table(), e.to_string()))?;
        rows.pop().ok_or(AppError::NotFound)
    }

    async fn update_profile(&self, user_id: &str, patch: &UpdateProfile) -> AppResult<()> {
        let filter = format!("eq.{user_id}");
        self.mutate(Collection::Users, ("userId", &filter), patch)
            .await
    }

    async fn delete_order(&self, id: i64) -> AppResult<()> {
        let id = format!("eq.{id}");
        self.delete(Collection::Orders, ("id", &id)).await
    }

    async fn delete_product(&self, id: i64) -> AppResult<()> {
        let id = format!("eq.{id}");
        self.delete(Collection::Products, ("id", &id)).await
    }

    async fn delete_review(&self, id: i64) -> AppResult<()> {
        let id = format!("eq.{id}");
        self.delete(Collection::Reviews, ("id", &id)).await
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let filter = format!("eq.{user_id}");
        self.delete(Collection::Users, ("userId", &filter)).await
    }
}
