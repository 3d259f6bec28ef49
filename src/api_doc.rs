use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Item, ItemPayload};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "item-service API",
        version = "1.0.0",
        description = "List, create, and rename items stored in SQLite"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::create::create_handler,
        handlers::update::update_handler
    ),
    components(
        schemas(
            Item,
            ItemPayload,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "items", description = "Item operations")
    )
)]
pub struct ApiDoc;
