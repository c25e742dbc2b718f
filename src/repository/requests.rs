//! Item requests repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{pagination::OffsetPage, request::ItemRequest},
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<ItemRequest> {
        sqlx::query_as::<_, ItemRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Create a new request
    pub async fn create(
        &self,
        requestor_id: i64,
        description: &str,
        created: DateTime<Utc>,
    ) -> AppResult<ItemRequest> {
        let request = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO requests (description, requestor_id, created)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(requestor_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    /// A user's own requests, newest first
    pub async fn find_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            "SELECT * FROM requests WHERE requestor_id = $1 ORDER BY created DESC",
        )
        .bind(requestor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Requests from everyone else, newest first, offset-paginated
    pub async fn find_by_other_requestors(
        &self,
        requestor_id: i64,
        page: OffsetPage,
    ) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT * FROM requests
            WHERE requestor_id != $1
            ORDER BY created DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(requestor_id)
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }
}
