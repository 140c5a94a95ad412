//! Shared types: list projection, screen state, response wrappers.

pub mod listing;
mod response;
mod screen;

pub use listing::{filter_paginate, ListQuery, PageView, Searchable};
pub use response::{ApiResponse, Created, MessageResponse};
pub use screen::{Phase, Screen};
