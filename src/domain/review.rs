//! Review entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A row of the `Reviews` collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: i64,
    pub user_id: String,
    pub order_id: Option<i64>,
    pub product_id: i64,
    pub content: String,
    /// 1 to 5
    pub stars: u8,
    pub created_at: DateTime<Utc>,
    /// Admin reply, absent until an operator answers
    pub reply_content: Option<String>,
}

/// Admin reply payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReviewReply {
    #[validate(length(min = 1, message = "Reply cannot be empty"))]
    pub reply: String,
}
