//! Item request service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        item::ItemDto,
        pagination::OffsetPage,
        request::{CreateItemRequest, ItemRequestDto},
        validate_dto,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new item request
    pub async fn create(&self, user_id: i64, request: CreateItemRequest) -> AppResult<ItemRequestDto> {
        validate_dto(&request)?;
        request.validate_fields()?;
        let user = self.repository.users.get_by_id(user_id).await?;
        let created = self
            .repository
            .requests
            .create(user.id, &request.description, Utc::now())
            .await?;
        tracing::debug!("Request created: id={} user={}", created.id, user.id);
        Ok(created.into())
    }

    /// The caller's own requests, newest first, with answering items attached
    pub async fn list_own(&self, user_id: i64) -> AppResult<Vec<ItemRequestDto>> {
        let user = self.repository.users.get_by_id(user_id).await?;
        let requests = self.repository.requests.find_by_requestor(user.id).await?;
        self.with_items(requests).await
    }

    /// Requests from other users, newest first, offset-paginated
    pub async fn list_others(
        &self,
        user_id: i64,
        page: OffsetPage,
    ) -> AppResult<Vec<ItemRequestDto>> {
        let requests = self
            .repository
            .requests
            .find_by_other_requestors(user_id, page)
            .await?;
        self.with_items(requests).await
    }

    /// Get a request by ID with answering items attached
    pub async fn get_by_id(&self, user_id: i64, request_id: i64) -> AppResult<ItemRequestDto> {
        self.repository.users.get_by_id(user_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        let mut dto = ItemRequestDto::from(request);
        dto.items = self.items_for_request(dto.id).await?;
        Ok(dto)
    }

    async fn with_items(
        &self,
        requests: Vec<crate::models::request::ItemRequest>,
    ) -> AppResult<Vec<ItemRequestDto>> {
        let mut dtos = Vec::with_capacity(requests.len());
        for request in requests {
            let mut dto = ItemRequestDto::from(request);
            dto.items = self.items_for_request(dto.id).await?;
            dtos.push(dto);
        }
        Ok(dtos)
    }

    async fn items_for_request(&self, request_id: i64) -> AppResult<Vec<ItemDto>> {
        let items = self.repository.items.find_by_request(request_id).await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }
}
