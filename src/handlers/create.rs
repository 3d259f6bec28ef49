use crate::error::{ApiError, ErrorResponse};
use crate::models::{Item, ItemPayload};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

/// POST /items handler - Create an item
///
/// The body is decoded as JSON whatever its content type, before storage is
/// touched; any decode failure is a 400.
/// The id in the response is the one SQLite assigned to the new row.
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = ItemPayload,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Body missing, malformed, or without a string name", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let payload: ItemPayload = serde_json::from_slice(&body)?;

    if let Some(ignored) = payload.id {
        tracing::debug!("Ignoring client-supplied id {} on create", ignored);
    }

    let id = state.store.insert_item(payload.name.clone()).await?;

    tracing::info!("Created item with id: {}", id);
    Ok((
        StatusCode::CREATED,
        Json(Item {
            id,
            name: payload.name,
        }),
    ))
}
