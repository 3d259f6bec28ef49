use crate::error::{ApiError, ErrorResponse};
use crate::models::{Item, ItemPayload};
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

/// PUT /items/{id} handler - Rename an item
///
/// A path id that does not parse as an integer, or does not even decode as
/// UTF-8, is treated as 0. The body is decoded as JSON whatever its content
/// type. There is no existence check: renaming an id with no row still
/// answers 200 and echoes the request back. The response is built from the
/// request, not re-read.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = i64, Path, description = "Identifier of the item to rename")
    ),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Update applied (including when no row matched)", body = Item),
        (status = 400, description = "Body missing, malformed, or without a string name", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let id = path
        .map(|Path(id_str)| parse_item_id(&id_str))
        .unwrap_or_default();
    let payload: ItemPayload = serde_json::from_slice(&body)?;

    if payload.id.is_some_and(|body_id| body_id != id) {
        tracing::debug!("Ignoring body id {:?}, using path id {}", payload.id, id);
    }

    let affected = state.store.update_item(id, payload.name.clone()).await?;
    if affected == 0 {
        tracing::info!("Update matched no item with id: {}", id);
    } else {
        tracing::info!("Updated item with id: {}", id);
    }

    Ok((
        StatusCode::OK,
        Json(Item {
            id,
            name: payload.name,
        }),
    ))
}

fn parse_item_id(raw: &str) -> i64 {
    raw.parse().unwrap_or_default()
}
