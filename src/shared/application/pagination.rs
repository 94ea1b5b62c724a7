/// Pagination support for list endpoints
///
/// Limit/offset model used across all bounded contexts
use serde::{Deserialize, Serialize};

use crate::shared::config::PaginationSettings;
use crate::shared::errors::{AppError, AppResult};

/// Raw `limit`/`offset` query parameters for endpoints with no other filters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageQuery {
    pub fn resolve(&self, settings: &PaginationSettings) -> AppResult<PageRequest> {
        PageRequest::resolve(self.limit, self.offset, settings)
    }
}

/// Resolved limit/offset for database queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Apply defaults and caps to raw query parameters
    pub fn resolve(
        limit: Option<u32>,
        offset: Option<u32>,
        settings: &PaginationSettings,
    ) -> AppResult<Self> {
        let limit = limit.unwrap_or(settings.default_limit);
        if limit == 0 {
            return Err(AppError::InvalidInput("Limit must be positive".to_string()));
        }

        Ok(Self {
            limit: limit.min(settings.max_limit),
            offset: offset.unwrap_or(0),
        })
    }

    /// Get limit for database queries
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> i64 {
        self.offset as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        let settings = PaginationSettings::default();
        Self::new(settings.default_limit, 0)
    }
}

/// A window of rows plus the total size of the filtered set
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }

    /// Slice an already materialised collection
    pub fn from_vec(all: Vec<T>, request: &PageRequest) -> Self {
        let total_count = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset as usize)
            .take(request.limit as usize)
            .collect();
        Self { items, total_count }
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub count: u64,
    pub next_offset: Option<u32>,
    pub results: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(page: Page<T>, request: &PageRequest) -> Self {
        let end = request.offset as u64 + page.items.len() as u64;
        let next_offset = (end < page.total_count).then_some(end as u32);

        Self {
            count: page.total_count,
            next_offset,
            results: page.items,
        }
    }
}
