use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Page and limit as supplied by a caller (e.g. query string values).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}

/// Page and limit after the pagination policy has been applied; both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: usize,
    pub limit: usize,
}

impl PaginationConfig {
    /// Page below 1 becomes 1, a missing or non-positive limit becomes the
    /// default, and limits above the maximum are clamped to it.
    pub fn resolve(&self, request: PageRequest) -> PageParams {
        let page = request.page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = request
            .limit
            .filter(|l| *l >= 1)
            .map_or(self.default_limit, |l| usize::try_from(l).unwrap_or(usize::MAX))
            .clamp(1, self.max_limit.max(1));
        PageParams {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_pages: usize,
    pub current_page: usize,
    pub total: usize,
}

/// Slices `[(page-1)*limit, page*limit)` out of `items`.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> (Vec<T>, PageInfo) {
    let total = items.len();
    let start = (params.page - 1).saturating_mul(params.limit);
    let slice = items.into_iter().skip(start).take(params.limit).collect();
    let info = PageInfo {
        total_pages: total.div_ceil(params.limit),
        current_page: params.page,
        total,
    };
    (slice, info)
}
