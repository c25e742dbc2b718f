//! Item management service: CRUD with ownership rules, search, comments,
//! and the owner-facing last/next booking composition.

use std::cmp::Ordering;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{CommentDto, CreateComment},
        item::{CreateItem, ItemDto, UpdateItem},
        pagination::OffsetPage,
        validate_dto,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new item owned by `owner_id`
    pub async fn create(&self, owner_id: i64, item: CreateItem) -> AppResult<ItemDto> {
        validate_dto(&item)?;
        item.validate_fields()?;
        let owner = self.repository.users.get_by_id(owner_id).await?;
        if let Some(request_id) = item.request_id {
            self.repository.requests.get_by_id(request_id).await?;
        }
        let created = self
            .repository
            .items
            .create(
                owner.id,
                &item.name,
                &item.description,
                item.available,
                item.request_id,
            )
            .await?;
        tracing::debug!("Item created: id={} owner={}", created.id, owner.id);
        Ok(created.into())
    }

    /// Apply a partial update. Owner only; unset fields are left untouched.
    /// Field values are validated only after the ownership check, so a
    /// non-owner gets the access error even for a malformed patch.
    pub async fn update(&self, item_id: i64, caller_id: i64, patch: UpdateItem) -> AppResult<ItemDto> {
        patch.require_any_field()?;
        let caller = self.repository.users.get_by_id(caller_id).await?;
        let mut item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != caller.id {
            return Err(AppError::Access(format!(
                "User {} may not modify item {}",
                caller_id, item_id
            )));
        }
        validate_dto(&patch)?;
        patch.validate_fields()?;
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        let updated = self.repository.items.update(&item).await?;
        tracing::debug!("Item updated: id={}", updated.id);
        Ok(updated.into())
    }

    /// Delete an item. Owner only.
    pub async fn delete(&self, item_id: i64, caller_id: i64) -> AppResult<()> {
        let item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != caller_id {
            return Err(AppError::Access(format!(
                "User {} may not modify item {}",
                caller_id, item_id
            )));
        }
        self.repository.items.delete(item_id).await?;
        tracing::debug!("Item deleted: id={}", item_id);
        Ok(())
    }

    /// Item with its comments; last/next booking only for the owner.
    /// The caller header is optional on this route.
    pub async fn get_by_id(&self, caller_id: Option<i64>, item_id: i64) -> AppResult<ItemDto> {
        let item = self.repository.items.get_by_id(item_id).await?;
        let owner_id = item.owner_id;
        let mut dto = ItemDto::from(item);
        dto.comments = self
            .repository
            .comments
            .find_by_item(item_id)
            .await?
            .into_iter()
            .map(CommentDto::from)
            .collect();
        if caller_id == Some(owner_id) {
            self.attach_last_and_next(&mut dto).await?;
        }
        Ok(dto)
    }

    /// The owner's items with last/next booking, items with the soonest
    /// upcoming booking first, items without one last.
    pub async fn list_by_owner(&self, owner_id: i64, page: OffsetPage) -> AppResult<Vec<ItemDto>> {
        let owner = self.repository.users.get_by_id(owner_id).await?;
        let items = self.repository.items.find_by_owner(owner.id, page).await?;
        let mut dtos = Vec::with_capacity(items.len());
        for item in items {
            let mut dto = ItemDto::from(item);
            self.attach_last_and_next(&mut dto).await?;
            dtos.push(dto);
        }
        dtos.sort_by(cmp_by_next_booking);
        Ok(dtos)
    }

    /// The whole catalog, paginated
    pub async fn get_all(&self, page: OffsetPage) -> AppResult<Vec<ItemDto>> {
        let items = self.repository.items.find_all(page).await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }

    /// Substring search over available items. Blank text short-circuits to an
    /// empty result without querying the store.
    pub async fn search(&self, text: &str, page: OffsetPage) -> AppResult<Vec<ItemDto>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items = self.repository.items.search(text, page).await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }

    /// Comment on an item. Only allowed after a completed APPROVED booking.
    pub async fn create_comment(
        &self,
        author_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentDto> {
        comment.validate_fields()?;
        let item = self.repository.items.get_by_id(item_id).await?;
        let author = self.repository.users.get_by_id(author_id).await?;
        let now = Utc::now();
        let allowed = self
            .repository
            .bookings
            .has_past_approved(author.id, item.id, now)
            .await?;
        if !allowed {
            return Err(AppError::NotAvailable(format!(
                "Cannot comment on item {} without a completed booking",
                item.id
            )));
        }
        let created = self
            .repository
            .comments
            .create(&comment.text, item.id, author.id, now)
            .await?;
        tracing::debug!("Comment created: id={} item={}", created.id, item.id);
        Ok(created.into())
    }

    async fn attach_last_and_next(&self, dto: &mut ItemDto) -> AppResult<()> {
        let now = Utc::now();
        dto.last_booking = self
            .repository
            .bookings
            .find_last_for_item(dto.id, now)
            .await?;
        dto.next_booking = self
            .repository
            .bookings
            .find_next_for_item(dto.id, now)
            .await?;
        Ok(())
    }
}

/// Items with an upcoming booking sort by its start, ascending; items
/// without one sort last.
fn cmp_by_next_booking(a: &ItemDto, b: &ItemDto) -> Ordering {
    match (&a.next_booking, &b.next_booking) {
        (Some(next_a), Some(next_b)) => next_a.start_date.cmp(&next_b.start_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingRef;
    use chrono::Duration;

    fn item_dto(id: i64, next_start_days: Option<i64>) -> ItemDto {
        let now = Utc::now();
        ItemDto {
            id,
            name: format!("item-{}", id),
            description: "d".to_string(),
            available: true,
            request_id: None,
            last_booking: None,
            next_booking: next_start_days.map(|days| BookingRef {
                id: id * 10,
                booker_id: 1,
                start_date: now + Duration::days(days),
                end_date: now + Duration::days(days + 1),
            }),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_imminent_booking_sorts_first() {
        let mut items = vec![item_dto(1, Some(5)), item_dto(2, Some(1)), item_dto(3, Some(3))];
        items.sort_by(cmp_by_next_booking);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_items_without_next_booking_sort_last() {
        let mut items = vec![item_dto(1, None), item_dto(2, Some(2)), item_dto(3, None)];
        items.sort_by(cmp_by_next_booking);
        assert_eq!(items[0].id, 2);
        assert!(items[1].next_booking.is_none());
        assert!(items[2].next_booking.is_none());
    }
}
