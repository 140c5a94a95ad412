//! Domain layer - entities and the join/aggregate engine.
//!
//! Source entities mirror the hosted store's collections; the aggregate
//! module folds them into the derived views the dashboard renders.
//! Everything here is pure; infrastructure concerns stay in `infra`.

pub mod aggregate;
mod amount;
mod order;
mod payment;
mod product;
mod review;
mod user;
mod views;

pub use order::{Order, OrderStatus};
pub use payment::{Payment, PaymentStatus};
pub use product::{NewProduct, Product, UpdateProduct};
pub use review::{Review, ReviewReply};
pub use user::{UpdateProfile, User};
pub use views::{CustomerRow, DashboardStats, OrderView, ReviewView};
