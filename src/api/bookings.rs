//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDto, CreateBooking},
        pagination::OffsetPage,
    },
};

use super::SharerUserId;

/// Booking list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DecisionQuery {
    pub approved: Option<bool>,
}

/// List bookings made by the caller
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "The caller's bookings", body = Vec<BookingDto>),
        (status = 400, description = "Unknown state filter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_bookings_by_booker(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDto>>> {
    let page = OffsetPage::new(query.from, query.size)?;
    let bookings = state
        .services
        .bookings
        .list_for_booker(user_id, query.state.as_deref(), page)
        .await?;
    Ok(Json(bookings))
}

/// List bookings on items owned by the caller
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<BookingDto>),
        (status = 400, description = "Unknown state filter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_bookings_by_owner(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDto>>> {
    let page = OffsetPage::new(query.from, query.size)?;
    let bookings = state
        .services
        .bookings
        .list_for_owner(user_id, query.state.as_deref(), page)
        .await?;
    Ok(Json(bookings))
}

/// Get booking by ID (visible to the booker and the item's owner only)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDto),
        (status = 404, description = "Booking not found or hidden")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDto>> {
    let booking = state.services.bookings.get_by_id(user_id, id).await?;
    Ok(Json(booking))
}

/// Create a booking in WAITING status
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Invalid window or item unavailable"),
        (status = 404, description = "Item or user not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(booking): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDto>)> {
    let created = state.services.bookings.create(user_id, booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a booking (item owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        DecisionQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDto),
        (status = 400, description = "Already approved or caller not allowed"),
        (status = 404, description = "Booking not found or hidden")
    )
)]
pub async fn decide_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Query(query): Query<DecisionQuery>,
) -> AppResult<Json<BookingDto>> {
    let approved = query.approved.ok_or_else(|| {
        AppError::Validation("Query parameter 'approved' is required".to_string())
    })?;
    let booking = state.services.bookings.decide(id, user_id, approved).await?;
    Ok(Json(booking))
}
