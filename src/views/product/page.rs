use super::Summary;
use crate::models::ProductRecord;
use crate::services::query::Paging;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    /// Matches of the whole predicate, not of the window.
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(paging: Paging, total: i64) -> Self {
        let limit = i64::from(paging.limit.max(1));
        let total = total.max(0);

        Self {
            page: paging.page,
            limit: paging.limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub products: Vec<Summary>,
    pub pagination: Pagination,
}

impl Page {
    pub fn new(records: Vec<ProductRecord>, paging: Paging, total: i64) -> Self {
        Self {
            products: records.into_iter().map(Summary::from).collect(),
            pagination: Pagination::new(paging, total),
        }
    }
}
