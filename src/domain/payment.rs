//! Payment entity and payment status domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payment status of a payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        };
        write!(f, "{s}")
    }
}

/// A row of the `Payments` collection.
///
/// `order_id` references `Order::id`. At most one payment per order is
/// expected in current usage, but the relation is not enforced as 1:1;
/// joins take the first row found.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: String,
    pub order_id: i64,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}
