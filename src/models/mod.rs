//! Data models for PeerShare

pub mod booking;
pub mod comment;
pub mod item;
pub mod pagination;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDto, BookingRef, BookingState, BookingStatus};
pub use comment::{Comment, CommentDto};
pub use item::{Item, ItemDto};
pub use pagination::OffsetPage;
pub use request::{ItemRequest, ItemRequestDto};
pub use user::User;

use crate::error::{AppError, AppResult};

/// Run `validator` derive checks on a request DTO, folding failures into the
/// Validation error class.
pub fn validate_dto<T: validator::Validate>(dto: &T) -> AppResult<()> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
