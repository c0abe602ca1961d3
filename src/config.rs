use anyhow::Result;
use sea_orm::Database;

use crate::auth::AuthConfig;
use crate::schemas::AppState;

/// Access-token lifetime used when TOKEN_EXPIRY_SECS is not set.
const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 3600;

/// Build application state from the given database URL and the
/// environment-sourced token configuration.
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    dotenvy::dotenv().ok();

    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    let secret =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "dresshub-dev-secret".to_string());
    let expiry_secs = std::env::var("TOKEN_EXPIRY_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECS);

    Ok(AppState {
        db,
        auth: AuthConfig::new(&secret, expiry_secs),
    })
}
