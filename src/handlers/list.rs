use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /items handler - List all items
///
/// Returns every stored item in the order SQLite yields them. Either the full
/// set is returned or an error; a failure mid-read never produces a partial list.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All stored items", body = [Item]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Item>>), ApiError> {
    let items = state.store.list_items().await?;

    tracing::info!("Listed {} items", items.len());
    Ok((StatusCode::OK, Json(items)))
}
