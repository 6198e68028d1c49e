mod config;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use guestlist_core::{GuestBook, SheetStore};
use guestlist_sheets::{ServiceAccountKey, SheetsClient};

use crate::config::ServerConfig;
use crate::state::AppState;

fn app<S: SheetStore>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::guests::router::<S>())
        .with_state(state)
        .layer(cors)
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the real environment still applies
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load()?;

    let key = ServiceAccountKey::from_json(&config.google_service_account_key)
        .context("Invalid GOOGLE_SERVICE_ACCOUNT_KEY")?;
    let store = SheetsClient::with_base_url(key, &config.spreadsheet_id, &config.sheets_api_url)?;

    let state = AppState::new(GuestBook::new(store, &config.sheet_name));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        sheet = %config.sheet_name,
        "guestlist-server listening on http://localhost:{}",
        config.port
    );
    axum::serve(listener, app(state)).await?;

    Ok(())
}
