//! PeerShare Item-Sharing Marketplace
//!
//! A REST JSON API server for an item-sharing marketplace: users list items,
//! book each other's items for date ranges, approve or reject bookings, and
//! comment on items they have borrowed.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
