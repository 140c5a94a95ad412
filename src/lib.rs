//! Storefront Admin - backend for a hosted store's admin dashboard
//!
//! The dashboard renders derived views of a remote store: customers with
//! lifetime spend, orders joined with their customer and payment, product
//! review boards, and headline sales figures. This crate fetches the
//! source collections, runs the pure join/aggregate engine over them, and
//! serves filtered, paginated pages over HTTP.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Source entities and the join/aggregate engine
//! - **services**: One manager per dashboard screen
//! - **infra**: Gateways to the hosted store, auth, storage and chat
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (list projection, screen state, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Print current store totals
//! cargo run -- stats
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
