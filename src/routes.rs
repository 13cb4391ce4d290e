use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Route path constants - single source of truth for all API paths
pub const HEALTH: &str = "/health";
pub const CONFIG: &str = "/config";
pub const CONFIG_DIRECT: &str = "/config/direct";
pub const CONFIG_REQUEST: &str = "/config/request";
pub const RESOLVE: &str = "/resolve/{domain}/{operation}";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(CONFIG, get(handlers::config_handler))
        .route(CONFIG_DIRECT, get(handlers::direct_handler))
        .route(CONFIG_REQUEST, get(handlers::request_handler))
        .route(RESOLVE, get(handlers::resolve_handler))
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
