//! Offset-based pagination utilities.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Error type for page window validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Limit must be between 1 and {max}, got {got}")]
    InvalidLimit { got: i64, max: i64 },
    #[error("Offset must not be negative, got {0}")]
    NegativeOffset(i64),
}

/// Bounds applied when resolving a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: i64,
    pub max_size: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// A page window as supplied by a caller.
///
/// Both fields are optional; missing values fall back to the configured
/// default page size and an offset of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageRequest {
    /// Creates a request with an explicit limit and offset.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Validates the request against `limits` and produces a [`Page`].
    pub fn resolve(&self, limits: PageLimits) -> Result<Page, PageError> {
        let limit = self.limit.unwrap_or(limits.default_size);
        if limit < 1 || limit > limits.max_size {
            return Err(PageError::InvalidLimit {
                got: limit,
                max: limits.max_size,
            });
        }

        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(PageError::NegativeOffset(offset));
        }

        Ok(Page { limit, offset })
    }
}

/// A validated window, safe to bind into `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Index range this page covers within a sequence of `len` items.
    ///
    /// The range is clamped to `len`, so an offset past the end yields an
    /// empty range.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let end = start
            .saturating_add(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .min(len);
        start..end
    }
}
