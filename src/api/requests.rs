//! Item request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        pagination::PageQuery,
        request::{CreateItemRequest, ItemRequestDto},
    },
};

use super::SharerUserId;

/// Create a new item request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequestDto),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemRequestDto>)> {
    let created = state.services.requests.create(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the caller's own requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    responses(
        (status = 200, description = "The caller's requests", body = Vec<ItemRequestDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_own_requests(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Json<Vec<ItemRequestDto>>> {
    let requests = state.services.requests.list_own(user_id).await?;
    Ok(Json(requests))
}

/// List requests from other users
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("from" = Option<i64>, Query, description = "Result offset"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Requests from other users", body = Vec<ItemRequestDto>)
    )
)]
pub async fn get_other_requests(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<ItemRequestDto>>> {
    let requests = state
        .services
        .requests
        .list_others(user_id, query.to_page()?)
        .await?;
    Ok(Json(requests))
}

/// Get request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDto),
        (status = 404, description = "Request or user not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemRequestDto>> {
    let request = state.services.requests.get_by_id(user_id, id).await?;
    Ok(Json(request))
}
