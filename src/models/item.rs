//! Item model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::booking::BookingRef;
use crate::models::comment::CommentDto;

/// Item record as stored
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Item response body. Last/next booking are only populated for the
/// item's owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
    pub comments: Vec<CommentDto>,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        ItemDto {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: String,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,
    pub available: bool,
    /// Request this item answers, if any
    pub request_id: Option<i64>,
}

impl CreateItem {
    pub fn validate_fields(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be blank".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Description must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial item update; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl UpdateItem {
    /// An all-absent patch is rejected before the item is even looked up.
    pub fn require_any_field(&self) -> AppResult<()> {
        if self.name.is_none() && self.description.is_none() && self.available.is_none() {
            return Err(AppError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }
        Ok(())
    }

    /// Provided fields must carry usable values. Checked only once the
    /// caller is known to own the item.
    pub fn validate_fields(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Name must not be blank".to_string()));
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(AppError::Validation(
                    "Description must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_blank_name() {
        let item = CreateItem {
            name: " ".to_string(),
            description: "a drill".to_string(),
            available: true,
            request_id: None,
        };
        assert!(item.validate_fields().is_err());
    }

    #[test]
    fn test_update_rejects_empty_patch() {
        let patch = UpdateItem {
            name: None,
            description: None,
            available: None,
        };
        assert!(patch.require_any_field().is_err());
    }

    #[test]
    fn test_update_accepts_single_field() {
        let patch = UpdateItem {
            name: None,
            description: None,
            available: Some(false),
        };
        assert!(patch.require_any_field().is_ok());
        assert!(patch.validate_fields().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_name_value() {
        let patch = UpdateItem {
            name: Some("  ".to_string()),
            description: None,
            available: None,
        };
        assert!(patch.validate_fields().is_err());
    }
}
