mod auth;
mod config;
mod db;
mod errors;
mod models;
mod resume;
mod routes;
mod state;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::password::PasswordHasher;
use crate::auth::service::AccountService;
use crate::auth::token::TokenMaker;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Auth core: a bad secret or cost aborts startup
    let tokens =
        TokenMaker::new(&config.token_symmetric_key).context("invalid TOKEN_SYMMETRIC_KEY")?;
    let hasher = PasswordHasher::new(config.bcrypt_cost).context("invalid BCRYPT_COST")?;
    info!("Token maker ready (bcrypt cost {})", hasher.cost());

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(db));

    let accounts = AccountService::new(store.clone(), hasher, tokens.clone());
    let state = AppState::new(store, accounts, tokens);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
