//! sheetbridge server entry point.
//!
//! Bootstraps configuration, authenticates against Google, reconciles the
//! identity cache from Drive, and starts the Axum HTTP server.

use std::sync::Arc;

use sheetbridge_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use sheetbridge_core::{SheetCache, SheetControl};
use sheetbridge_google::GoogleSheetsClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ApiConfig::from_env()?;

    let google = Arc::new(GoogleSheetsClient::from_credentials_file(
        &config.credentials_path,
    )?);
    google.check_credentials().await?;

    let cache = Arc::new(SheetCache::new());
    let control = Arc::new(SheetControl::new(
        google.clone(),
        google,
        cache,
        config.notify_emails.clone(),
    ));

    // The cache must mirror Drive before the first request is served.
    control.reconcile().await?;

    let app = create_api_router(AppState::new(control));

    let addr = config.socket_addr()?;
    tracing::info!(%addr, "Starting sheetbridge server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
