//! Join/aggregate engine.
//!
//! Pure functions folding the raw collections into the derived rows the
//! dashboard renders. All joins are by key, so output is identical for
//! identical inputs regardless of input ordering, and recomputing on
//! unchanged inputs yields identical output; no state is carried between
//! calls. Joins with no match substitute explicit defaults rather than
//! propagating an absent value, and sums never include orders whose
//! status or linked payment status disqualifies them.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use super::views::{CustomerRow, OrderView, ReviewView};
use super::{Order, OrderStatus, Payment, PaymentStatus, Review, User};
use crate::config::{UNKNOWN_ADDRESS, UNKNOWN_PAYMENT_METHOD, UNKNOWN_USER_NAME};

/// Sum `total_amount` of Completed orders per customer.
///
/// Users without a Completed order never appear; look-ups default to zero.
pub fn customer_spend(orders: &[Order]) -> HashMap<String, Decimal> {
    let mut spend: HashMap<String, Decimal> = HashMap::new();
    for order in orders {
        if order.status == OrderStatus::Completed {
            *spend.entry(order.user_id.clone()).or_insert(Decimal::ZERO) += order.total_amount;
        }
    }
    spend
}

/// Join every user with their lifetime spend.
pub fn merge_customers(users: &[User], orders: &[Order]) -> Vec<CustomerRow> {
    let spend = customer_spend(orders);
    users
        .iter()
        .map(|user| CustomerRow {
            id: user.user_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            total_spend: spend.get(&user.user_id).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Join each order with its user and payment.
///
/// `user_id` is a unique key, so at most one user matches. The payment
/// relation is not enforced as 1:1; when duplicates exist the first row
/// found wins, which is a data-quality assumption of the source store,
/// not a guarantee of this model.
pub fn merge_orders(orders: &[Order], users: &[User], payments: &[Payment]) -> Vec<OrderView> {
    let users_by_id: HashMap<&str, &User> = users
        .iter()
        .map(|user| (user.user_id.as_str(), user))
        .collect();

    let mut payment_by_order: HashMap<i64, &Payment> = HashMap::new();
    for payment in payments {
        payment_by_order.entry(payment.order_id).or_insert(payment);
    }

    orders
        .iter()
        .map(|order| {
            let user = users_by_id.get(order.user_id.as_str());
            let payment = payment_by_order.get(&order.id);

            OrderView {
                id: order.id,
                user_id: order.user_id.clone(),
                total_amount: order.total_amount,
                status: order.status,
                created_at: order.created_at,
                user_name: user
                    .and_then(|u| u.name.clone())
                    .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string()),
                shipping_address: user
                    .and_then(|u| u.address.clone())
                    .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
                payment_status: payment.map(|p| p.status).unwrap_or(PaymentStatus::Pending),
                payment_method: payment
                    .and_then(|p| p.payment_method.clone())
                    .unwrap_or_else(|| UNKNOWN_PAYMENT_METHOD.to_string()),
                payment_date: payment.map(|p| p.created_at),
                payment_id: payment.map(|p| p.id.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Total sales: Completed orders whose id is covered by a Paid payment.
pub fn total_sales(orders: &[Order], payments: &[Payment]) -> Decimal {
    let paid_order_ids: HashSet<i64> = payments
        .iter()
        .filter(|payment| payment.status == PaymentStatus::Paid)
        .map(|payment| payment.order_id)
        .collect();

    orders
        .iter()
        .filter(|order| {
            order.status == OrderStatus::Completed && paid_order_ids.contains(&order.id)
        })
        .map(|order| order.total_amount)
        .sum()
}

/// Join each review with its reviewer's display name.
pub fn merge_reviews(reviews: &[Review], users: &[User]) -> Vec<ReviewView> {
    let users_by_id: HashMap<&str, &User> = users
        .iter()
        .map(|user| (user.user_id.as_str(), user))
        .collect();

    reviews
        .iter()
        .map(|review| ReviewView {
            id: review.id,
            reviewer: match users_by_id.get(review.user_id.as_str()) {
                Some(user) => format!(
                    "{} ({})",
                    user.name.as_deref().unwrap_or("Unknown User"),
                    review.user_id
                ),
                None => format!("User ID: {}", review.user_id),
            },
            content: review.content.clone(),
            stars: review.stars,
            created_at: review.created_at,
            reply_content: review.reply_content.clone(),
        })
        .collect()
}

/// Mean star rating, `None` for an empty collection.
pub fn average_stars(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.stars)).sum();
    Some(f64::from(sum) / reviews.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn user(id: &str, name: Option<&str>, address: Option<&str>) -> User {
        User {
            user_id: id.to_string(),
            name: name.map(str::to_string),
            email: format!("{id}@example.com"),
            address: address.map(str::to_string),
            phone: None,
            role: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn order(id: i64, user_id: &str, amount: Decimal, status: OrderStatus) -> Order {
        Order {
            id,
            user_id: user_id.to_string(),
            total_amount: amount,
            status,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    fn payment(id: &str, order_id: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: id.to_string(),
            order_id,
            status,
            payment_method: Some("Card".to_string()),
            created_at: Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn completed_paid_order_counts_toward_sales() {
        let orders = vec![order(1, "u1", dec!(100), OrderStatus::Completed)];
        let payments = vec![payment("p1", 1, PaymentStatus::Paid)];
        assert_eq!(total_sales(&orders, &payments), dec!(100));
    }

    #[test]
    fn completed_but_unpaid_order_is_excluded_from_sales() {
        let orders = vec![order(1, "u1", dec!(100), OrderStatus::Completed)];
        assert_eq!(total_sales(&orders, &[]), Decimal::ZERO);

        let failed = vec![payment("p1", 1, PaymentStatus::Failed)];
        assert_eq!(total_sales(&orders, &failed), Decimal::ZERO);
    }

    #[test]
    fn paid_but_not_completed_order_is_excluded_from_sales() {
        let orders = vec![order(1, "u1", dec!(100), OrderStatus::Shipped)];
        let payments = vec![payment("p1", 1, PaymentStatus::Paid)];
        assert_eq!(total_sales(&orders, &payments), Decimal::ZERO);
    }

    #[test]
    fn spend_sums_only_completed_orders_per_customer() {
        let orders = vec![
            order(1, "u1", dec!(40), OrderStatus::Completed),
            order(2, "u1", dec!(60), OrderStatus::Completed),
            order(3, "u1", dec!(999), OrderStatus::Returned),
            order(4, "u2", dec!(15), OrderStatus::Pending),
        ];
        let spend = customer_spend(&orders);
        assert_eq!(spend.get("u1").copied(), Some(dec!(100)));
        assert_eq!(spend.get("u2"), None);
    }

    #[test]
    fn customer_without_orders_has_zero_spend() {
        let users = vec![user("u1", Some("A"), None)];
        let rows = merge_customers(&users, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_spend, Decimal::ZERO);
    }

    #[test]
    fn order_join_substitutes_defaults_when_rows_are_missing() {
        let orders = vec![order(9, "ghost", dec!(10), OrderStatus::Pending)];
        let views = merge_orders(&orders, &[], &[]);
        let view = &views[0];
        assert_eq!(view.user_name, "Unknown");
        assert_eq!(view.shipping_address, "Not Provided");
        assert_eq!(view.payment_status, PaymentStatus::Pending);
        assert_eq!(view.payment_method, "Unknown");
        assert_eq!(view.payment_id, "");
        assert!(view.payment_date.is_none());
    }

    #[test]
    fn order_join_picks_matching_user_and_payment() {
        let users = vec![
            user("u1", Some("Ada"), Some("1 Main St")),
            user("u2", Some("Grace"), None),
        ];
        let orders = vec![order(1, "u1", dec!(25), OrderStatus::Shipped)];
        let payments = vec![payment("p1", 1, PaymentStatus::Paid)];

        let views = merge_orders(&orders, &users, &payments);
        let view = &views[0];
        assert_eq!(view.user_name, "Ada");
        assert_eq!(view.shipping_address, "1 Main St");
        assert_eq!(view.payment_status, PaymentStatus::Paid);
        assert_eq!(view.payment_id, "p1");
    }

    #[test]
    fn duplicate_payments_resolve_to_first_row_found() {
        let orders = vec![order(1, "u1", dec!(25), OrderStatus::Completed)];
        let payments = vec![
            payment("p-first", 1, PaymentStatus::Pending),
            payment("p-second", 1, PaymentStatus::Paid),
        ];
        let views = merge_orders(&orders, &[], &payments);
        assert_eq!(views[0].payment_id, "p-first");
        assert_eq!(views[0].payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn join_output_is_independent_of_input_ordering() {
        let users = vec![user("u1", Some("Ada"), None), user("u2", Some("Grace"), None)];
        let orders = vec![
            order(1, "u1", dec!(10), OrderStatus::Completed),
            order(2, "u2", dec!(20), OrderStatus::Completed),
        ];
        let payments = vec![
            payment("p1", 1, PaymentStatus::Paid),
            payment("p2", 2, PaymentStatus::Paid),
        ];

        let forward = merge_orders(&orders, &users, &payments);

        let mut users_rev = users.clone();
        users_rev.reverse();
        let mut payments_rev = payments.clone();
        payments_rev.reverse();
        let reversed = merge_orders(&orders, &users_rev, &payments_rev);

        for (a, b) in forward.iter().zip(reversed.iter()) {
            assert_eq!(a.user_name, b.user_name);
            assert_eq!(a.payment_id, b.payment_id);
        }
        assert_eq!(
            total_sales(&orders, &payments),
            total_sales(&orders, &payments_rev)
        );
    }

    #[test]
    fn recomputation_on_unchanged_inputs_is_identical() {
        let users = vec![user("u1", Some("Ada"), None)];
        let orders = vec![order(1, "u1", dec!(10), OrderStatus::Completed)];
        let payments = vec![payment("p1", 1, PaymentStatus::Paid)];

        let first = merge_customers(&users, &orders);
        let second = merge_customers(&users, &orders);
        assert_eq!(first[0].total_spend, second[0].total_spend);
        assert_eq!(
            total_sales(&orders, &payments),
            total_sales(&orders, &payments)
        );
    }

    #[test]
    fn review_join_labels_known_and_unknown_reviewers() {
        let users = vec![user("u1", Some("Ada"), None), user("u2", None, None)];
        let reviews = vec![
            Review {
                id: 1,
                user_id: "u1".to_string(),
                order_id: None,
                product_id: 5,
                content: "Great".to_string(),
                stars: 5,
                created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
                reply_content: None,
            },
            Review {
                id: 2,
                user_id: "missing".to_string(),
                order_id: None,
                product_id: 5,
                content: "Ok".to_string(),
                stars: 3,
                created_at: Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap(),
                reply_content: None,
            },
        ];

        let views = merge_reviews(&reviews, &users);
        assert_eq!(views[0].reviewer, "Ada (u1)");
        assert_eq!(views[1].reviewer, "User ID: missing");
    }

    #[test]
    fn average_stars_handles_empty_and_mixed_sets() {
        assert_eq!(average_stars(&[]), None);

        let reviews: Vec<Review> = [5u8, 4, 3]
            .iter()
            .enumerate()
            .map(|(i, stars)| Review {
                id: i as i64,
                user_id: "u1".to_string(),
                order_id: None,
                product_id: 1,
                content: String::new(),
                stars: *stars,
                created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
                reply_content: None,
            })
            .collect();
        assert_eq!(average_stars(&reviews), Some(4.0));
    }
}
