//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` and `realtime::RealtimeError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{AuthAppState, AuthConfig, InMemoryUserRepository, PgUserRepository};
use axum::{
    Router,
    http::{Method, header},
};
use realtime::RealtimeConfig;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "auth_api=info,auth=info,realtime=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Invalid environment configuration")?;

    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };
    if let Some(pepper) = &config.password_pepper {
        auth_config = auth_config.with_pepper(pepper.as_bytes());
    }

    let auth_routes = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("Migrations completed");

            auth::auth_router(PgUserRepository::new(pool), auth_config)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory and lost on restart");
            auth::auth_router_generic(AuthAppState::new(
                Arc::new(InMemoryUserRepository::new()),
                auth_config,
            ))
        }
    };

    let mut realtime_config = RealtimeConfig {
        api_key: config.ably_api_key.clone(),
        ttl_ms: config.ably_token_ttl_ms,
        ..RealtimeConfig::default()
    };
    if let Some(client_id) = &config.ably_client_id {
        realtime_config.client_id = client_id.clone();
    }
    if realtime_config.api_key.is_none() {
        tracing::warn!("ABLY_API_KEY not set, /ably-auth will answer 500");
    }

    let cors = CorsLayer::new()
        .allow_origin(config.client_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .merge(auth_routes)
        .merge(realtime::realtime_router(realtime_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
