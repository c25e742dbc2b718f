//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PeerShare API",
        version = "1.0.0",
        description = "Item-Sharing Marketplace REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::get_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Items
        items::get_items_by_owner,
        items::get_all_items,
        items::get_item,
        items::search_items,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::create_comment,
        // Bookings
        bookings::get_bookings_by_booker,
        bookings::get_bookings_by_owner,
        bookings::get_booking,
        bookings::create_booking,
        bookings::decide_booking,
        // Requests
        requests::create_request,
        requests::get_own_requests,
        requests::get_other_requests,
        requests::get_request,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::models::user::User,
            crate::models::user::UserSummary,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::item::ItemDto,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::booking::BookingDto,
            crate::models::booking::BookingRef,
            crate::models::booking::BookingStatus,
            crate::models::booking::CreateBooking,
            crate::models::booking::ItemSummary,
            crate::models::comment::CommentDto,
            crate::models::comment::CreateComment,
            crate::models::request::ItemRequestDto,
            crate::models::request::CreateItemRequest,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "users", description = "User management"),
        (name = "items", description = "Item catalog"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "requests", description = "Item requests")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
