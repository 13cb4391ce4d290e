use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ApiConfig, ResolvedEndpoint};
use crate::request::RequestConfig;

/// Response type for the gateway configuration
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiConfigResponse {
    pub environment: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout: u64,
    /// Path templates keyed by domain, then operation
    pub apis: BTreeMap<String, BTreeMap<String, String>>,
}

impl From<&ApiConfig> for ApiConfigResponse {
    fn from(api: &ApiConfig) -> Self {
        let mut apis: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (domain, operation, template) in api.apis.iter() {
            apis.entry(domain.to_string())
                .or_default()
                .insert(operation.to_string(), template.to_string());
        }

        Self {
            environment: api.environment.to_string(),
            base_url: api.base_url.to_string(),
            timeout: u64::try_from(api.timeout.as_millis()).unwrap_or(u64::MAX),
            apis,
        }
    }
}

/// Response type for the direct (gateway bypassing) service URLs
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DirectUrlsResponse {
    pub environment: String,
    /// Base URL keyed by service key, e.g. `cartService`
    pub services: BTreeMap<String, String>,
}

impl From<&ApiConfig> for DirectUrlsResponse {
    fn from(api: &ApiConfig) -> Self {
        Self {
            environment: api.environment.to_string(),
            services: api
                .direct
                .iter()
                .map(|(service, url)| (service.key().to_string(), url.to_string()))
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token_key: String,
    pub token_prefix: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReportingResponse {
    pub show_message: bool,
    pub log_error: bool,
}

/// Response type for the request conventions
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RequestConfigResponse {
    pub headers: BTreeMap<String, String>,
    pub auth: AuthResponse,
    pub error: ErrorReportingResponse,
}

impl From<&RequestConfig> for RequestConfigResponse {
    fn from(request: &RequestConfig) -> Self {
        Self {
            headers: request.headers.clone(),
            auth: AuthResponse {
                token_key: request.auth.token_key.clone(),
                token_prefix: request.auth.token_prefix.clone(),
            },
            error: ErrorReportingResponse {
                show_message: request.error.show_message,
                log_error: request.error.log_error,
            },
        }
    }
}

/// Query parameters for the resolve endpoint
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ResolveQuery {
    pub id: Option<String>,
    /// `true` or `false`; checked by the handler so bad values get a JSON error
    pub direct: Option<String>,
}

/// Response type for a resolved endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResolveResponse {
    /// Service key the request is sent to (`gateway` unless direct)
    pub service: String,
    pub url: String,
}

impl From<ResolvedEndpoint> for ResolveResponse {
    fn from(endpoint: ResolvedEndpoint) -> Self {
        Self {
            service: endpoint.service.key().to_string(),
            url: endpoint.url.into(),
        }
    }
}
