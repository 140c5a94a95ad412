//! Client-style list projection: substring filtering and fixed-size pagination.
//!
//! Derived collections are small enough to project in memory: filter with a
//! case-insensitive substring match over each row's display fields, then
//! slice out the requested 1-based page. The requested page is clamped into
//! `[1, total_pages]` so it is never left pointing past the end after the
//! collection shrinks.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::DEFAULT_PAGE_NUMBER;
use crate::domain::{CustomerRow, OrderView, Product, ReviewView};

/// Rows that can be matched by the search box.
///
/// The haystack is the fixed set of display fields the original screens
/// search over, joined into one string.
pub trait Searchable {
    fn haystack(&self) -> String;
}

/// Query parameters shared by all list endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring search
    #[serde(default)]
    pub q: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: None,
            page: DEFAULT_PAGE_NUMBER,
        }
    }
}

/// One page of a filtered collection
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(
    CustomerPage = PageView<CustomerRow>,
    OrderPage = PageView<OrderView>,
    ProductPage = PageView<Product>,
    ReviewPage = PageView<ReviewView>
)]
pub struct PageView<T> {
    pub data: Vec<T>,
    /// The page actually served, after clamping
    pub page: u64,
    pub page_size: u64,
    /// Number of rows matching the filter
    pub total: u64,
    /// `ceil(total / page_size)`; 0 means no pagination controls
    pub total_pages: u64,
}

impl<T> PageView<T> {
    /// Slice one page out of an already-filtered collection.
    ///
    /// `page` is clamped into `[1, total_pages]`; an empty collection
    /// serves page 1 with `total_pages == 0`.
    pub fn paginate(items: Vec<T>, page: u64, page_size: u64) -> Self {
        let total = items.len() as u64;
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };
        let page = page.clamp(1, total_pages.max(1));

        let offset = ((page - 1) * page_size) as usize;
        let data: Vec<T> = items
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Self {
            data,
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

/// Apply the search filter, then paginate.
pub fn filter_paginate<T: Searchable>(
    items: Vec<T>,
    query: Option<&str>,
    page: u64,
    page_size: u64,
) -> PageView<T> {
    let filtered = match query {
        Some(q) if !q.trim().is_empty() => {
            let needle = q.to_lowercase();
            items
                .into_iter()
                .filter(|item| item.haystack().to_lowercase().contains(&needle))
                .collect()
        }
        _ => items,
    };

    PageView::paginate(filtered, page, page_size)
}
