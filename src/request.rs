//! Request conventions shared by every client: headers, auth token, error flags

use std::collections::BTreeMap;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::ConfigError;

fn invalid_header(name: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidHeader {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// How the bearer token is attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    pub token_key: String,
    pub token_prefix: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: "Authorization".to_string(),
            token_prefix: "Bearer ".to_string(),
        }
    }
}

impl AuthConfig {
    pub fn authorization_value(&self, token: &str) -> String {
        format!("{}{}", self.token_prefix, token)
    }

    /// Header carrying `token`. The token itself is not checked.
    pub fn header(&self, token: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
        let name = HeaderName::try_from(self.token_key.as_str())
            .map_err(|e| invalid_header(&self.token_key, e))?;
        let value = HeaderValue::try_from(self.authorization_value(token))
            .map_err(|e| invalid_header(&self.token_key, e))?;
        Ok((name, value))
    }
}

/// Whether failed requests are shown to the user and logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReporting {
    pub show_message: bool,
    pub log_error: bool,
}

impl Default for ErrorReporting {
    fn default() -> Self {
        Self {
            show_message: true,
            log_error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestConfig {
    pub headers: BTreeMap<String, String>,
    pub auth: AuthConfig,
    pub error: ErrorReporting,
}

impl Default for RequestConfig {
    fn default() -> Self {
        let headers = [
            ("Content-Type", "application/json"),
            ("Accept", "application/json"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

        Self {
            headers,
            auth: AuthConfig::default(),
            error: ErrorReporting::default(),
        }
    }
}

impl RequestConfig {
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|e| invalid_header(name, e))?;
            let header_value =
                HeaderValue::try_from(value.as_str()).map_err(|e| invalid_header(name, e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}
