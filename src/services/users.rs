//! User management service

use crate::{
    error::AppResult,
    models::{
        user::{CreateUser, UpdateUser, User},
        validate_dto,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get all users
    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        self.repository.users.get_all().await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a new user
    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        validate_dto(&user)?;
        user.validate_fields()?;
        let created = self.repository.users.create(&user.name, &user.email).await?;
        tracing::debug!("User created: id={}", created.id);
        Ok(created)
    }

    /// Apply a partial update; unset fields are left untouched
    pub async fn update(&self, id: i64, patch: UpdateUser) -> AppResult<User> {
        validate_dto(&patch)?;
        patch.validate_fields()?;
        let mut user = self.repository.users.get_by_id(id).await?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        let updated = self.repository.users.update(&user).await?;
        tracing::debug!("User updated: id={}", updated.id);
        Ok(updated)
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::debug!("User deleted: id={}", id);
        Ok(())
    }
}
