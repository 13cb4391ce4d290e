use crate::models::{ApiConfigResponse, DirectUrlsResponse, RequestConfigResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /config handler - Gateway base URL, timeout and path templates
#[utoipa::path(
    get,
    path = routes::CONFIG,
    responses(
        (status = 200, description = "Configuration of the selected environment", body = ApiConfigResponse)
    ),
    tag = "config"
)]
pub async fn config_handler(State(state): State<AppState>) -> (StatusCode, Json<ApiConfigResponse>) {
    (StatusCode::OK, Json(ApiConfigResponse::from(&state.config.api)))
}

/// GET /config/direct handler - Service URLs for calls that bypass the gateway
#[utoipa::path(
    get,
    path = routes::CONFIG_DIRECT,
    responses(
        (status = 200, description = "Direct service URLs", body = DirectUrlsResponse)
    ),
    tag = "config"
)]
pub async fn direct_handler(State(state): State<AppState>) -> (StatusCode, Json<DirectUrlsResponse>) {
    (StatusCode::OK, Json(DirectUrlsResponse::from(&state.config.api)))
}

/// GET /config/request handler - Default headers, auth convention and error flags
#[utoipa::path(
    get,
    path = routes::CONFIG_REQUEST,
    responses(
        (status = 200, description = "Request conventions", body = RequestConfigResponse)
    ),
    tag = "config"
)]
pub async fn request_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<RequestConfigResponse>) {
    (
        StatusCode::OK,
        Json(RequestConfigResponse::from(&state.config.api.request)),
    )
}
