use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{create_handler, health_handler, list_handler, update_handler};
use crate::state::AppState;

// Route path constants - single source of truth for all API paths
pub const HEALTH: &str = "/health";
pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the application router with every route and the tracing layer
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(health_handler))
        .route(ITEMS, get(list_handler).post(create_handler))
        .route(ITEM, put(update_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
