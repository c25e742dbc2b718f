//! Offset/limit pagination for list queries

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// Validated offset/limit pair applied to list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPage {
    pub offset: i64,
    pub limit: i64,
}

impl OffsetPage {
    pub const DEFAULT_SIZE: i64 = 10;

    /// Build a page from the raw `from`/`size` query parameters.
    pub fn new(from: Option<i64>, size: Option<i64>) -> AppResult<Self> {
        let offset = from.unwrap_or(0);
        let limit = size.unwrap_or(Self::DEFAULT_SIZE);
        if offset < 0 {
            return Err(AppError::Validation(
                "From must be zero or greater".to_string(),
            ));
        }
        if limit < 1 {
            return Err(AppError::Validation(
                "Size must be one or greater".to_string(),
            ));
        }
        Ok(Self { offset, limit })
    }
}

/// Raw pagination query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl PageQuery {
    pub fn to_page(&self) -> AppResult<OffsetPage> {
        OffsetPage::new(self.from, self.size)
    }
}
