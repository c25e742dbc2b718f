//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingRef, BookingState, BookingStatus},
        pagination::OffsetPage,
    },
};

/// Booking rows are always fetched together with the item and booker data
/// needed for authorization checks and response composition.
const SELECT_BOOKING: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           b.item_id, i.name AS item_name, i.owner_id AS item_owner_id,
           b.booker_id, u.name AS booker_name
    FROM bookings b
    JOIN items i ON b.item_id = i.id
    JOIN users u ON b.booker_id = u.id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!("{} WHERE b.id = $1", SELECT_BOOKING))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Create a new booking in WAITING status
    pub async fn create(
        &self,
        item_id: i64,
        booker_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(item_id)
        .bind(booker_id)
        .bind(BookingStatus::Waiting)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Persist a status decision
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get_by_id(id).await
    }

    /// Bookings made by a user, filtered by state, newest start first
    pub async fn find_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: OffsetPage,
    ) -> AppResult<Vec<Booking>> {
        self.find_filtered("b.booker_id", booker_id, state, now, page)
            .await
    }

    /// Bookings on a user's items, filtered by state, newest start first
    pub async fn find_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: OffsetPage,
    ) -> AppResult<Vec<Booking>> {
        self.find_filtered("i.owner_id", owner_id, state, now, page)
            .await
    }

    async fn find_filtered(
        &self,
        scope_column: &str,
        user_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: OffsetPage,
    ) -> AppResult<Vec<Booking>> {
        let order = "ORDER BY b.start_date DESC";
        let rows = match state {
            BookingState::All => {
                sqlx::query_as::<_, Booking>(&format!(
                    "{SELECT_BOOKING} WHERE {scope_column} = $1 {order} OFFSET $2 LIMIT $3"
                ))
                .bind(user_id)
                .bind(page.offset)
                .bind(page.limit)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Current => {
                sqlx::query_as::<_, Booking>(&format!(
                    "{SELECT_BOOKING} WHERE {scope_column} = $1 \
                     AND b.start_date <= $2 AND b.end_date >= $2 {order} OFFSET $3 LIMIT $4"
                ))
                .bind(user_id)
                .bind(now)
                .bind(page.offset)
                .bind(page.limit)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Past => {
                sqlx::query_as::<_, Booking>(&format!(
                    "{SELECT_BOOKING} WHERE {scope_column} = $1 \
                     AND b.end_date < $2 {order} OFFSET $3 LIMIT $4"
                ))
                .bind(user_id)
                .bind(now)
                .bind(page.offset)
                .bind(page.limit)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Future => {
                sqlx::query_as::<_, Booking>(&format!(
                    "{SELECT_BOOKING} WHERE {scope_column} = $1 \
                     AND b.start_date > $2 {order} OFFSET $3 LIMIT $4"
                ))
                .bind(user_id)
                .bind(now)
                .bind(page.offset)
                .bind(page.limit)
                .fetch_all(&self.pool)
                .await?
            }
            BookingState::Waiting | BookingState::Rejected => {
                let status = if state == BookingState::Waiting {
                    BookingStatus::Waiting
                } else {
                    BookingStatus::Rejected
                };
                sqlx::query_as::<_, Booking>(&format!(
                    "{SELECT_BOOKING} WHERE {scope_column} = $1 \
                     AND b.status = $2 {order} OFFSET $3 LIMIT $4"
                ))
                .bind(user_id)
                .bind(status)
                .bind(page.offset)
                .bind(page.limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Most recent past APPROVED booking for an item: latest end among
    /// bookings started before `now`, single row.
    pub async fn find_last_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingRef>> {
        let row = sqlx::query_as::<_, BookingRef>(
            r#"
            SELECT id, booker_id, start_date, end_date
            FROM bookings
            WHERE item_id = $1 AND status = $2 AND start_date < $3
            ORDER BY end_date DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Nearest future APPROVED booking for an item: earliest start after
    /// `now`, single row.
    pub async fn find_next_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingRef>> {
        let row = sqlx::query_as::<_, BookingRef>(
            r#"
            SELECT id, booker_id, start_date, end_date
            FROM bookings
            WHERE item_id = $1 AND status = $2 AND start_date > $3
            ORDER BY start_date ASC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Whether a user has a completed (ended before `now`) APPROVED booking
    /// on an item. Gates comment creation.
    pub async fn has_past_approved(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = $1 AND item_id = $2 AND status = $3 AND end_date < $4
            )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
