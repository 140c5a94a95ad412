//! Derived view rows.
//!
//! Nothing here is persisted: every struct is recomputed from the current
//! source collections on each fetch cycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::{OrderStatus, PaymentStatus};
use crate::types::Searchable;

/// A customer with lifetime spend.
///
/// Spend is the sum of `total_amount` over the customer's Completed
/// orders; a customer with none has spend 0.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerRow {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = f64)]
    pub total_spend: Decimal,
}

impl Searchable for CustomerRow {
    fn haystack(&self) -> String {
        format!("{} {}", self.name.as_deref().unwrap_or(""), self.email)
    }
}

/// An order joined with its user and payment.
///
/// Missing joins substitute documented defaults instead of propagating an
/// absent value: "Unknown" name, "Not Provided" address, Pending payment
/// status, "Unknown" method, empty payment id/date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderView {
    pub id: i64,
    pub user_id: String,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub shipping_address: String,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub payment_date: Option<DateTime<Utc>>,
    /// Empty when no payment row exists; the payment-status select is
    /// disabled in that case
    pub payment_id: String,
}

impl Searchable for OrderView {
    fn haystack(&self) -> String {
        format!("{} {} {}", self.id, self.user_name, self.shipping_address)
    }
}

/// A review joined with its reviewer's display name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewView {
    pub id: i64,
    pub reviewer: String,
    pub content: String,
    pub stars: u8,
    pub created_at: DateTime<Utc>,
    pub reply_content: Option<String>,
}

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Sum over Completed orders that have a Paid payment
    #[schema(value_type = f64)]
    pub total_sales: Decimal,
    pub total_orders: u64,
    pub total_products: u64,
    pub total_customers: u64,
}
