//! User entity as stored in the `Users` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A storefront account.
///
/// Rows are created by the external signup flow; this layer only reads
/// them, patches profile fields from the account form, and deletes them
/// on explicit admin action. `user_id` is the unique key orders reference
/// through their `user_id` column.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account-form profile patch
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New shipping address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
