//! Item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        comment::{CommentDto, CreateComment},
        item::{CreateItem, ItemDto, UpdateItem},
        pagination::PageQuery,
    },
};

use super::{OptionalSharerUserId, SharerUserId};

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub text: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// List the caller's items with last/next booking annotations
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("from" = Option<i64>, Query, description = "Result offset"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "The caller's items", body = Vec<ItemDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_items_by_owner(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<ItemDto>>> {
    let items = state
        .services
        .items
        .list_by_owner(user_id, query.to_page()?)
        .await?;
    Ok(Json(items))
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/items/all",
    tag = "items",
    params(
        ("from" = Option<i64>, Query, description = "Result offset"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "All items", body = Vec<ItemDto>)
    )
)]
pub async fn get_all_items(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<ItemDto>>> {
    let items = state.services.items.get_all(query.to_page()?).await?;
    Ok(Json(items))
}

/// Get item by ID with comments; booking annotations for the owner only
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDto),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    OptionalSharerUserId(user_id): OptionalSharerUserId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemDto>> {
    let item = state.services.items.get_by_id(user_id, id).await?;
    Ok(Json(item))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<ItemDto>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ItemDto>>> {
    let page = crate::models::OffsetPage::new(query.from, query.size)?;
    let items = state.services.items.search(&query.text, page).await?;
    Ok(Json(items))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Owner or request not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(item): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<ItemDto>)> {
    let created = state.services.items.create(user_id, item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update an item (owner only)
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemDto),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateItem>,
) -> AppResult<Json<ItemDto>> {
    let updated = state.services.items.update(id, user_id, patch).await?;
    Ok(Json(updated))
}

/// Delete an item (owner only)
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.items.delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "No completed booking on this item"),
        (status = 404, description = "Item or user not found")
    )
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Json(comment): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let created = state
        .services
        .items
        .create_comment(user_id, id, comment)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
