use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse};
use crate::handlers;
use crate::models::{
    ApiConfigResponse, AuthResponse, DirectUrlsResponse, ErrorReportingResponse,
    RequestConfigResponse, ResolveResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "coffee-api-config API",
        version = "1.0.0",
        description = "Service endpoints and request conventions of the coffee shop backend, per environment"
    ),
    paths(
        handlers::health::health_handler,
        handlers::config::config_handler,
        handlers::config::direct_handler,
        handlers::config::request_handler,
        handlers::resolve::resolve_handler
    ),
    components(
        schemas(
            ApiConfigResponse,
            DirectUrlsResponse,
            RequestConfigResponse,
            AuthResponse,
            ErrorReportingResponse,
            ResolveResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "config", description = "Endpoint configuration lookups")
    )
)]
pub struct ApiDoc;
