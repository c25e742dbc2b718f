//! Comment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Comment row joined with the author's name
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// Comment response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        CommentDto {
            id: c.id,
            text: c.text,
            author_name: c.author_name,
            created: c.created,
        }
    }
}

/// Create comment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateComment {
    pub text: String,
}

impl CreateComment {
    /// Comments are 1 to 500 characters and never blank.
    pub fn validate_fields(&self) -> AppResult<()> {
        if self.text.trim().is_empty() || self.text.chars().count() > 500 {
            return Err(AppError::Validation(
                "Comment must be between 1 and 500 characters".to_string(),
            ));
        }
        Ok(())
    }
}
