//! Product entity and its create/update payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::amount;
use crate::types::Searchable;

/// A row of the `Products` collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "amount::lenient")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(default, deserialize_with = "amount::lenient")]
    #[schema(value_type = f64)]
    pub discounted_price: Decimal,
    pub category: Option<String>,
    #[serde(default)]
    pub stock: i64,
    /// Whether the virtual try-on widget supports this product
    #[serde(rename = "tryOnCompatible", default)]
    pub try_on_compatible: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Public URLs owned by object storage
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Searchable for Product {
    fn haystack(&self) -> String {
        format!("{} {}", self.name, self.category.as_deref().unwrap_or(""))
    }
}

/// Payload for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(default)]
    #[schema(value_type = f64)]
    pub discounted_price: Decimal,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "tryOnCompatible", default)]
    pub try_on_compatible: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Payload for editing a product; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "tryOnCompatible", skip_serializing_if = "Option::is_none")]
    pub try_on_compatible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}
