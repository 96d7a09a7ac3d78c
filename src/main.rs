// Main entry point for the chat server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parlor::adapters::auth::{Argon2CredentialHasher, HmacTokenService};
use parlor::adapters::http::{api_routes, AppState};
use parlor::adapters::postgres::{
    PostgresMessageRepository, PostgresRoomRepository, PostgresUserRepository,
    PostgresVisitedRoomRepository,
};
use parlor::adapters::storage::LocalImageStorage;
use parlor::adapters::websocket::{websocket_router, BroadcastChannelRouter, WebSocketState};
use parlor::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log filter can come from it
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting chat server");

    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations complete");
    }

    // Wire adapters into the shared state
    let rooms = Arc::new(PostgresRoomRepository::new(pool.clone()));
    let messages = Arc::new(PostgresMessageRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let visited = Arc::new(PostgresVisitedRoomRepository::new(pool));
    let channel_router = Arc::new(BroadcastChannelRouter::new(config.server.channel_capacity));
    let tokens = Arc::new(HmacTokenService::new(
        &config.auth.token_secret,
        config.auth.token_ttl_secs,
    ));
    let images = Arc::new(LocalImageStorage::new(
        &config.storage.upload_dir,
        config.storage.public_prefix.clone(),
    ));

    let state = AppState {
        rooms: rooms.clone(),
        messages,
        users,
        visited,
        channel_router: channel_router.clone(),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        tokens,
        images,
    };

    let ws_state = WebSocketState {
        identity: Arc::new(state.identity_handler()),
        send_message: Arc::new(parlor::application::handlers::message::SendMessageHandler::new(
            state.rooms.clone(),
            state.messages.clone(),
            state.channel_router.clone(),
        )),
        rooms,
        router: channel_router,
    };

    let cors = cors_layer(&config);
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", api_routes().with_state(state))
        .merge(websocket_router().with_state(ws_state))
        .nest_service(
            config.storage.public_prefix.as_str(),
            ServeDir::new(&config.storage.upload_dir),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the CORS layer: explicit origins when configured, permissive in
/// development otherwise.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers(Any)
    }
}
