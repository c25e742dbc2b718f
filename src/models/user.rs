//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// User record as stored and returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across all users (database constraint)
    pub email: String,
}

/// Short user representation embedded in booking responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl CreateUser {
    pub fn validate_fields(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be blank".to_string()));
        }
        Ok(())
    }
}

/// Partial user update; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl UpdateUser {
    pub fn validate_fields(&self) -> AppResult<()> {
        if self.name.is_none() && self.email.is_none() {
            return Err(AppError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Name must not be blank".to_string()));
            }
        }
        Ok(())
    }
}
