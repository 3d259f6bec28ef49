use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Probe the shared SQLite connection
///
/// 200 while the store's connection thread still answers `SELECT 1`; 503
/// once it has been closed or the database file has become unreadable.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Item store answers queries", body = HealthResponse),
        (status = 503, description = "Item store connection unavailable", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.health_check().await {
        Ok(()) => {
            tracing::debug!("Item store answered health check");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(err) => {
            tracing::error!("Item store unavailable: {:#}", err);
            let error = format!("Cannot reach database: {:#}", err);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error,
                }),
            ))
        }
    }
}
