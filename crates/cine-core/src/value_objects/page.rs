//! Page-number pagination shared by list queries

use serde::Serialize;

/// Requested page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub const MAX_SIZE: u32 = 100;

    /// Build a request, clamping the page to >= 1 and the size to 1..=MAX_SIZE
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.size)
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, count: i64, results: Vec<T>) -> Self {
        let seen = request.offset() + results.len() as i64;
        Self {
            count,
            page: request.number,
            page_size: request.size,
            has_next: seen < count,
            results,
        }
    }

    /// Transform the items while keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            has_next: self.has_next,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
