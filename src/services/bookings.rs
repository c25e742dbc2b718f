//! Booking lifecycle and visibility service.
//!
//! This is the authorization core of the system: who may create, see and
//! decide a booking, and the WAITING -> APPROVED/REJECTED state machine.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDto, BookingState, BookingStatus, CreateBooking},
        pagination::OffsetPage,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking in WAITING status.
    ///
    /// Booking one's own item answers NotFound rather than a permission
    /// error, so a prober cannot learn who owns an item.
    pub async fn create(&self, requester_id: i64, booking: CreateBooking) -> AppResult<BookingDto> {
        booking.validate_window(Utc::now())?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;
        if !item.available {
            return Err(AppError::NotAvailable(
                "Item is not available for booking".to_string(),
            ));
        }
        let requester = self.repository.users.get_by_id(requester_id).await?;
        if item.owner_id == requester.id {
            return Err(AppError::NotFound(format!(
                "Item with id {} not found",
                item.id
            )));
        }
        let created = self
            .repository
            .bookings
            .create(item.id, requester.id, booking.start, booking.end)
            .await?;
        tracing::debug!("Booking created: id={} item={}", created.id, item.id);
        Ok(created.into())
    }

    /// Approve or reject a WAITING booking. Owner only.
    pub async fn decide(
        &self,
        booking_id: i64,
        caller_id: i64,
        approved: bool,
    ) -> AppResult<BookingDto> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        check_decision_access(&booking, caller_id)?;
        if booking.status == BookingStatus::Approved && approved {
            return Err(AppError::NotAvailable(format!(
                "Booking with id {} is already approved",
                booking_id
            )));
        }
        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = self
            .repository
            .bookings
            .update_status(booking_id, status)
            .await?;
        tracing::debug!("Booking decided: id={} status={}", booking_id, status);
        Ok(updated.into())
    }

    /// A booking is visible only to its booker and the item's owner.
    pub async fn get_by_id(&self, caller_id: i64, booking_id: i64) -> AppResult<BookingDto> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        if !is_party(&booking, caller_id) {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                booking_id
            )));
        }
        Ok(booking.into())
    }

    /// Bookings made by the caller, filtered and ordered by start descending
    pub async fn list_for_booker(
        &self,
        caller_id: i64,
        state: Option<&str>,
        page: OffsetPage,
    ) -> AppResult<Vec<BookingDto>> {
        let state = BookingState::parse(state)?;
        let user = self.repository.users.get_by_id(caller_id).await?;
        let bookings = self
            .repository
            .bookings
            .find_by_booker(user.id, state, Utc::now(), page)
            .await?;
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    /// Bookings on the caller's items, filtered and ordered by start descending
    pub async fn list_for_owner(
        &self,
        caller_id: i64,
        state: Option<&str>,
        page: OffsetPage,
    ) -> AppResult<Vec<BookingDto>> {
        let state = BookingState::parse(state)?;
        let user = self.repository.users.get_by_id(caller_id).await?;
        let bookings = self
            .repository
            .bookings
            .find_by_owner(user.id, state, Utc::now(), page)
            .await?;
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }
}

fn is_party(booking: &Booking, caller_id: i64) -> bool {
    booking.booker_id == caller_id || booking.item_owner_id == caller_id
}

/// Decision rights on a booking. The booker gets NotFound, hiding that the
/// booking is decidable at all; any other non-owner gets NotAvailable.
fn check_decision_access(booking: &Booking, caller_id: i64) -> AppResult<()> {
    if booking.item_owner_id != caller_id && booking.booker_id == caller_id {
        return Err(AppError::NotFound(format!(
            "Booking with id {} not found",
            booking.id
        )));
    }
    if booking.item_owner_id != caller_id {
        return Err(AppError::NotAvailable(format!(
            "Booking with id {} is not available",
            booking.id
        )));
    }
    Ok(())
}
