//! Paginated listing wrapper

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: i64) -> Self {
        let limit = limit.max(1);
        let pages = u32::try_from((total.max(0) + i64::from(limit) - 1) / i64::from(limit))
            .unwrap_or(u32::MAX);
        Self {
            items,
            page,
            limit,
            total,
            pages,
        }
    }
}
