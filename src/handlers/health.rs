use axum::response::Json;
use chrono::Utc;
use tracing::instrument;

use crate::schemas::HealthResponse;

/// Root status endpoint. Reports liveness without touching the database.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Server is running smoothly".to_string(),
        timestamp: Utc::now(),
    })
}
