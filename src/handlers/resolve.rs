use crate::config::CallMode;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{ResolveQuery, ResolveResponse};
use crate::paths::ApiDomain;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// GET /resolve/{domain}/{operation} handler - Absolute URL of a catalog operation
///
/// Query parameters:
/// - id: Identifier substituted into templates with a placeholder (required for those, rejected otherwise)
/// - direct: Bypass the gateway and address the owning service (optional, default: false)
#[utoipa::path(
    get,
    path = routes::RESOLVE,
    params(
        ("domain" = String, Path, description = "API domain: user, product, order, coupon, cart, ai, statistics"),
        ("operation" = String, Path, description = "Operation name within the domain, e.g. detail"),
        ("id" = Option<String>, Query, description = "Identifier for templates with a placeholder"),
        ("direct" = Option<bool>, Query, description = "Resolve against the service instead of the gateway")
    ),
    responses(
        (status = 200, description = "Resolved URL", body = ResolveResponse),
        (status = 400, description = "Identifier missing or not accepted, or invalid query parameter", body = ErrorResponse),
        (status = 404, description = "Unknown domain or operation", body = ErrorResponse)
    ),
    tag = "config"
)]
pub async fn resolve_handler(
    State(state): State<AppState>,
    Path((domain, operation)): Path<(String, String)>,
    Query(query): Query<ResolveQuery>,
) -> Result<(StatusCode, Json<ResolveResponse>), ApiError> {
    let domain: ApiDomain = domain.parse()?;
    let mode = match query.direct.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("false") => CallMode::Gateway,
        Some("true") => CallMode::Direct,
        Some(_) => {
            return Err(ApiError::InvalidQueryParam(format!(
                "direct must be one of: true, false, got '{}'",
                query.direct.unwrap_or_default()
            )))
        }
    };

    let endpoint = state
        .config
        .api
        .resolve(domain, &operation, query.id.as_deref(), mode)?;

    tracing::debug!("Resolved {}.{} ({:?}) to {}", domain, operation, mode, endpoint.url);
    Ok((StatusCode::OK, Json(ResolveResponse::from(endpoint))))
}
