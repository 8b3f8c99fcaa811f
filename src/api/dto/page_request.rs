//! Pagination query parameters.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// Largest accepted `per_page`.
pub const MAX_PER_PAGE: u32 = 1000;

/// Parsed pagination intent of a list request.
///
/// Extracted from the query string and validated before the handler runs:
///
/// - `page` (default 1, ≥ 1)
/// - `per_page` (default 10, 1..=[`MAX_PER_PAGE`])
/// - `paginate` (default 0): `1` wraps the list in a paginated envelope
/// - `vue` (default 0): with `paginate=1`, selects the Vue-table envelope
///
/// Invalid values are rejected with `400` and the parser/validator text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 1000, message = "per_page must be between 1 and 1000"))]
    pub per_page: u32,

    #[serde(default)]
    #[validate(range(max = 1, message = "paginate must be 0 or 1"))]
    pub paginate: u8,

    #[serde(default)]
    #[validate(range(max = 1, message = "vue must be 0 or 1"))]
    pub vue: u8,
}

impl PageRequest {
    pub fn is_paginated(&self) -> bool {
        self.paginate == 1
    }

    pub fn is_vue(&self) -> bool {
        self.vue == 1
    }

    /// Row offset of the first item on this page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Other`] if the offset does not fit in an `i64`.
    pub fn offset(&self) -> Result<i64, AppError> {
        (i64::from(self.page) - 1)
            .checked_mul(i64::from(self.per_page))
            .ok_or_else(|| AppError::other("page out of range"))
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            paginate: 0,
            vue: 0,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(request) = Query::<PageRequest>::from_request_parts(parts, state).await?;
        request.validate()?;
        Ok(request)
    }
}
