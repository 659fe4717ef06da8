//! Pagination extractor
//!
//! Reads the page number from the query string; the page size comes from
//! the community configuration.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use cine_core::PageRequest;
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

/// Validated page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl PageParams {
    /// Page request with the configured size
    pub fn with_size(self, size: u32) -> PageRequest {
        PageRequest::new(self.page, size)
    }
}

impl TryFrom<PageQuery> for PageParams {
    type Error = ApiError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        let Some(raw) = query.page.filter(|p| !p.trim().is_empty()) else {
            return Ok(Self::default());
        };

        match raw.trim().parse::<u32>() {
            Ok(page) if page >= 1 => Ok(Self { page }),
            _ => Err(ApiError::invalid_query("page must be a positive integer")),
        }
    }
}

/// Extracts a [`PageRequest`] sized by `community.page_size`
#[derive(Debug, Clone, Copy)]
pub struct Paged(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Paged
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        let params = PageParams::try_from(query)?;
        let size = AppState::from_ref(state).config().community.page_size;
        Ok(Paged(params.with_size(size)))
    }
}
