//! Order entity and shipping status domain.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::amount;

/// Shipping status of an order.
///
/// The set is closed: these are the only values the dashboard writes and
/// the only values its own selects offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Completed,
    Returned,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Returned => "Returned",
        };
        write!(f, "{s}")
    }
}

/// A row of the `Orders` collection.
///
/// `user_id` references `User::user_id`; many orders per user. The amount
/// is lenient-parsed: a missing or malformed value counts as zero so the
/// aggregation never faults on one bad row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    #[serde(default, deserialize_with = "amount::lenient")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn order_with_null_amount_deserializes_to_zero() {
        let order: Order = serde_json::from_value(json!({
            "id": 7,
            "user_id": "u1",
            "total_amount": null,
            "status": "Completed",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.total_amount, Decimal::ZERO);
    }

    #[test]
    fn order_with_missing_amount_deserializes_to_zero() {
        let order: Order = serde_json::from_value(json!({
            "id": 7,
            "user_id": "u1",
            "status": "Pending",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.total_amount, Decimal::ZERO);
    }

    #[test]
    fn status_serializes_with_store_casing() {
        assert_eq!(
            serde_json::to_value(OrderStatus::Completed).unwrap(),
            json!("Completed")
        );
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "user_id": "u1",
            "total_amount": 49.90,
            "status": "Returned",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Returned);
        assert_eq!(order.total_amount, dec!(49.90));
    }
}
