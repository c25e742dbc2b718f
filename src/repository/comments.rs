//! Comments repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::comment::Comment};

const SELECT_COMMENT: &str = r#"
    SELECT c.id, c.text, c.item_id, c.author_id, u.name AS author_name, c.created
    FROM comments c
    JOIN users u ON c.author_id = u.id
"#;

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new comment
    pub async fn create(
        &self,
        text: &str,
        item_id: i64,
        author_id: i64,
        created: DateTime<Utc>,
    ) -> AppResult<Comment> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        let comment = sqlx::query_as::<_, Comment>(&format!("{} WHERE c.id = $1", SELECT_COMMENT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(comment)
    }

    /// Comments on an item in chronological order
    pub async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "{} WHERE c.item_id = $1 ORDER BY c.created",
            SELECT_COMMENT
        ))
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}
