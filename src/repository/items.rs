//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{item::Item, pagination::OffsetPage},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Create a new item
    pub async fn create(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        available: bool,
        request_id: Option<i64>,
    ) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(available)
        .bind(owner_id)
        .bind(request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Persist an updated item row
    pub async fn update(&self, item: &Item) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET name = $1, description = $2, available = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Delete an item by ID
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Items owned by a user, offset-paginated
    pub async fn find_by_owner(&self, owner_id: i64, page: OffsetPage) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 ORDER BY id OFFSET $2 LIMIT $3",
        )
        .bind(owner_id)
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// The whole catalog, offset-paginated
    pub async fn find_all(&self, page: OffsetPage) -> AppResult<Vec<Item>> {
        let items =
            sqlx::query_as::<_, Item>("SELECT * FROM items ORDER BY id OFFSET $1 LIMIT $2")
                .bind(page.offset)
                .bind(page.limit)
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    /// Case-insensitive substring search against name or description,
    /// available items only
    pub async fn search(&self, text: &str, page: OffsetPage) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE available = TRUE
              AND (name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(text)
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items created in answer to a request
    pub async fn find_by_request(&self, request_id: i64) -> AppResult<Vec<Item>> {
        let items =
            sqlx::query_as::<_, Item>("SELECT * FROM items WHERE request_id = $1 ORDER BY id")
                .bind(request_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }
}
