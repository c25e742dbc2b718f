//! API handlers for PeerShare REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::error::AppError;

/// Header carrying the caller's identity. The value is trusted as-is; this
/// extractor is the single place a real authentication mechanism would
/// replace.
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Extractor for the calling user's id
pub struct SharerUserId(pub i64);

/// Extractor variant for routes where the caller header is optional
pub struct OptionalSharerUserId(pub Option<i64>);

fn parse_sharer_header(parts: &Parts) -> Result<Option<i64>, AppError> {
    let Some(value) = parts.headers.get(SHARER_USER_ID) else {
        return Ok(None);
    };
    let id = value
        .to_str()
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            AppError::Validation(format!("{} header is not a valid id", SHARER_USER_ID))
        })?;
    Ok(Some(id))
}

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parse_sharer_header(parts)? {
            Some(id) => Ok(SharerUserId(id)),
            None => Err(AppError::Validation(format!(
                "{} header is missing",
                SHARER_USER_ID
            ))),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSharerUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSharerUserId(parse_sharer_header(parts)?))
    }
}
