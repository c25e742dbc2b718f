//! Booking model, lifecycle status and list filters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::user::UserSummary;

/// Booking lifecycle status.
///
/// WAITING is the only initial state; APPROVED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversion for BookingStatus (stored as VARCHAR)
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Filter applied to booking list queries.
///
/// There is no APPROVED filter; the public API never exposed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Parse the `state` query parameter. None defaults to ALL; an
    /// unrecognized string is a validation failure, never a fallthrough.
    pub fn parse(state: Option<&str>) -> AppResult<Self> {
        match state {
            None => Ok(BookingState::All),
            Some("ALL") => Ok(BookingState::All),
            Some("CURRENT") => Ok(BookingState::Current),
            Some("PAST") => Ok(BookingState::Past),
            Some("FUTURE") => Ok(BookingState::Future),
            Some("WAITING") => Ok(BookingState::Waiting),
            Some("REJECTED") => Ok(BookingState::Rejected),
            Some(other) => Err(AppError::Validation(format!("Unknown state: {}", other))),
        }
    }
}

/// Booking row joined with item and booker data needed for responses
/// and authorization checks
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub item_id: i64,
    pub item_name: String,
    pub item_owner_id: i64,
    pub booker_id: i64,
    pub booker_name: String,
}

/// Short item representation embedded in booking responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
}

/// Booking response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemSummary,
    pub booker: UserSummary,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        BookingDto {
            id: b.id,
            start: b.start_date,
            end: b.end_date,
            status: b.status,
            item: ItemSummary {
                id: b.item_id,
                name: b.item_name,
            },
            booker: UserSummary {
                id: b.booker_id,
                name: b.booker_name,
            },
        }
    }
}

/// Compact booking annotation attached to owner-facing item views
/// (last and next booking)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRef {
    pub id: i64,
    pub booker_id: i64,
    #[serde(rename = "start")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "end")]
    pub end_date: DateTime<Utc>,
}

/// Create booking request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CreateBooking {
    /// Check the requested time window against `now`. Both endpoints must lie
    /// in the future and the window must be non-empty.
    pub fn validate_window(&self, now: DateTime<Utc>) -> AppResult<()> {
        if self.start < now {
            return Err(AppError::Validation(
                "Start must be in the future".to_string(),
            ));
        }
        if self.end < now {
            return Err(AppError::Validation(
                "End must be in the future".to_string(),
            ));
        }
        if self.start == self.end || self.end < self.start {
            return Err(AppError::Validation(
                "End must be after start".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking_at(start_offset: i64, end_offset: i64) -> (CreateBooking, DateTime<Utc>) {
        let now = Utc::now();
        (
            CreateBooking {
                item_id: 1,
                start: now + Duration::days(start_offset),
                end: now + Duration::days(end_offset),
            },
            now,
        )
    }

    #[test]
    fn test_parse_state() {
        assert_eq!(BookingState::parse(None).unwrap(), BookingState::All);
        assert_eq!(BookingState::parse(Some("ALL")).unwrap(), BookingState::All);
        assert_eq!(
            BookingState::parse(Some("CURRENT")).unwrap(),
            BookingState::Current
        );
        assert_eq!(
            BookingState::parse(Some("REJECTED")).unwrap(),
            BookingState::Rejected
        );
    }

    #[test]
    fn test_parse_state_unknown() {
        let err = BookingState::parse(Some("UNSUPPORTED")).unwrap_err();
        match err {
            crate::error::AppError::Validation(msg) => {
                assert_eq!(msg, "Unknown state: UNSUPPORTED")
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_window_valid() {
        let (b, now) = booking_at(1, 2);
        assert!(b.validate_window(now).is_ok());
    }

    #[test]
    fn test_window_end_before_start() {
        let (b, now) = booking_at(2, 1);
        assert!(b.validate_window(now).is_err());
    }

    #[test]
    fn test_window_start_equals_end() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        let b = CreateBooking {
            item_id: 1,
            start,
            end: start,
        };
        assert!(b.validate_window(now).is_err());
    }

    #[test]
    fn test_window_start_in_past() {
        let (b, now) = booking_at(-1, 2);
        assert!(b.validate_window(now).is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for s in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ] {
            assert_eq!(s.as_str().parse::<BookingStatus>().unwrap(), s);
        }
        assert!("PENDING".parse::<BookingStatus>().is_err());
    }
}
