//! Response types for list endpoints

use serde::{Deserialize, Serialize};

use crate::request::PageRequest;

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: u64, window: PageRequest) -> Self {
        let total_pages = total.div_ceil(u64::from(window.limit));
        Self {
            data,
            page: window.page,
            limit: window.limit,
            total,
            total_pages,
            has_next: u64::from(window.page) < total_pages,
            has_prev: window.page > 1,
        }
    }
}
