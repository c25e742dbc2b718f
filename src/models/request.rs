//! Item request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::item::ItemDto;

/// Request row as stored
#[derive(Debug, Clone, FromRow)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime<Utc>,
}

/// Request response body, annotated with the items created in answer to it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemRequestDto {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemDto>,
}

impl From<ItemRequest> for ItemRequestDto {
    fn from(r: ItemRequest) -> Self {
        ItemRequestDto {
            id: r.id,
            description: r.description,
            created: r.created,
            items: Vec::new(),
        }
    }
}

/// Create request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,
}

impl CreateItemRequest {
    pub fn validate_fields(&self) -> AppResult<()> {
        if self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Description must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_rejected() {
        let r = CreateItemRequest {
            description: "".to_string(),
        };
        assert!(r.validate_fields().is_err());
    }
}
