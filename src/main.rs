//! PeerShare Server - Item Sharing Marketplace
//!
//! A REST JSON API server for listing, booking and reviewing shared items.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use peershare_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("peershare_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PeerShare Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Users
        .route("/users", get(api::users::get_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", patch(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        // Items
        .route("/items", get(api::items::get_items_by_owner))
        .route("/items", post(api::items::create_item))
        .route("/items/all", get(api::items::get_all_items))
        .route("/items/search", get(api::items::search_items))
        .route("/items/:id", get(api::items::get_item))
        .route("/items/:id", patch(api::items::update_item))
        .route("/items/:id", delete(api::items::delete_item))
        .route("/items/:id/comment", post(api::items::create_comment))
        // Bookings
        .route("/bookings", get(api::bookings::get_bookings_by_booker))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/owner", get(api::bookings::get_bookings_by_owner))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id", patch(api::bookings::decide_booking))
        // Requests
        .route("/requests", post(api::requests::create_request))
        .route("/requests", get(api::requests::get_own_requests))
        .route("/requests/all", get(api::requests::get_other_requests))
        .route("/requests/:id", get(api::requests::get_request))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
