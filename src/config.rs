use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::environment::{Environment, ENV_VAR};
use crate::error::ConfigError;
use crate::gateway::GatewayRoutes;
use crate::paths::{ApiDomain, PathCatalog};
use crate::request::RequestConfig;
use crate::services::{join_path, DirectUrls, Service, ServiceUrls};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const TIMEOUT_VAR: &str = "COFFEE_API_TIMEOUT_MS";
pub const SHOW_ERRORS_VAR: &str = "COFFEE_SHOW_ERRORS";
pub const LOG_ERRORS_VAR: &str = "COFFEE_LOG_ERRORS";
pub const SERVICE_HOST_VAR: &str = "SERVICE_HOST";
pub const SERVICE_PORT_VAR: &str = "SERVICE_PORT";

/// Whether a request goes through the gateway or straight to its service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallMode {
    #[default]
    Gateway,
    Direct,
}

/// A concrete URL for one catalog operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Service the request is sent to
    pub service: Service,
    pub url: Url,
}

/// Everything a client needs to reach the backend in one environment
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub environment: Environment,
    /// Gateway URL of the environment
    pub base_url: Url,
    pub timeout: Duration,
    pub apis: PathCatalog,
    pub direct: DirectUrls,
    pub request: RequestConfig,
    pub gateway: GatewayRoutes,
}

impl ApiConfig {
    pub fn for_environment(environment: Environment) -> Result<Self, ConfigError> {
        let urls = ServiceUrls::for_environment(environment)?;

        Ok(Self {
            environment,
            direct: urls.direct(),
            base_url: urls.gateway,
            timeout: DEFAULT_TIMEOUT,
            apis: PathCatalog::standard(),
            request: RequestConfig::default(),
            gateway: GatewayRoutes::standard(),
        })
    }

    /// Rendered relative path of an operation, as seen by the gateway
    pub fn path(
        &self,
        domain: ApiDomain,
        operation: &str,
        id: Option<&str>,
    ) -> Result<String, ConfigError> {
        self.apis.get(domain, operation)?.render(id)
    }

    /// Resolve an operation to an absolute URL.
    ///
    /// Direct calls apply the gateway's rewrite for the path, so the service
    /// receives the same path it would have received through the gateway.
    pub fn resolve(
        &self,
        domain: ApiDomain,
        operation: &str,
        id: Option<&str>,
        mode: CallMode,
    ) -> Result<ResolvedEndpoint, ConfigError> {
        let path = self.path(domain, operation, id)?;

        match mode {
            CallMode::Gateway => Ok(ResolvedEndpoint {
                service: Service::Gateway,
                url: join_path(&self.base_url, &path)?,
            }),
            CallMode::Direct => {
                let route = self.gateway.route(&path)?;
                let base = self
                    .direct
                    .get(route.service)
                    .ok_or_else(|| ConfigError::NoRoute(path.clone()))?;
                Ok(ResolvedEndpoint {
                    service: route.service,
                    url: join_path(base, &route.downstream_path(&path))?,
                })
            }
        }
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub service_host: String,
    pub service_port: u16,
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => anyhow::bail!("{key} must be one of true, false, 1, 0 (got '{raw}')"),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::resolve(lookup(ENV_VAR).as_deref())
            .with_context(|| format!("{ENV_VAR} must name a known environment"))?;

        let mut api = ApiConfig::for_environment(environment)
            .with_context(|| format!("Service table for {environment} is invalid"))?;

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .with_context(|| format!("{TIMEOUT_VAR} must be a positive number of milliseconds"))?;
            api.timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(SHOW_ERRORS_VAR) {
            api.request.error.show_message = parse_flag(SHOW_ERRORS_VAR, &raw)?;
        }

        if let Some(raw) = lookup(LOG_ERRORS_VAR) {
            api.request.error.log_error = parse_flag(LOG_ERRORS_VAR, &raw)?;
        }

        let service_port = lookup(SERVICE_PORT_VAR)
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .with_context(|| format!("{SERVICE_PORT_VAR} must be a valid port number (0-65535)"))?;

        let service_host = lookup(SERVICE_HOST_VAR).unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            api,
            service_host,
            service_port,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.api.environment);
        tracing::info!("  Gateway: {}", self.api.base_url);
        for (service, url) in self.api.direct.iter() {
            tracing::info!("  {}: {}", service.key(), url);
        }
        tracing::info!("  Request timeout: {}ms", self.api.timeout.as_millis());
        tracing::info!(
            "  Errors shown: {}, logged: {}",
            self.api.request.error.show_message,
            self.api.request.error.log_error
        );
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_with_defaults() {
        let config = config_with(&[]).unwrap();

        assert_eq!(config.api.environment, Environment::Development);
        assert_eq!(config.api.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.api.timeout, Duration::from_millis(10_000));
        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "0.0.0.0");
    }

    #[test]
    fn test_base_url_is_gateway_of_selected_environment() {
        for env in Environment::ALL {
            let config = config_with(&[(ENV_VAR, env.as_str())]).unwrap();
            let urls = ServiceUrls::for_environment(env).unwrap();
            assert_eq!(config.api.base_url, urls.gateway);
            assert_eq!(config.api.direct, urls.direct());
        }
    }

    #[test]
    fn test_unknown_environment_fails_fast() {
        let result = config_with(&[(ENV_VAR, "staging")]);
        assert!(result.is_err());
        let error = format!("{:#}", result.unwrap_err());
        assert!(error.contains(ENV_VAR));
        assert!(error.contains("staging"));
    }

    #[test]
    fn test_config_with_all_vars() {
        let config = config_with(&[
            (ENV_VAR, "production"),
            (TIMEOUT_VAR, "2500"),
            (SHOW_ERRORS_VAR, "false"),
            (LOG_ERRORS_VAR, "1"),
            (SERVICE_HOST_VAR, "127.0.0.1"),
            (SERVICE_PORT_VAR, "8088"),
        ])
        .unwrap();

        assert_eq!(config.api.environment, Environment::Production);
        assert_eq!(config.api.timeout, Duration::from_millis(2500));
        assert!(!config.api.request.error.show_message);
        assert!(config.api.request.error.log_error);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.service_port, 8088);
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["soon", "0", "-5"] {
            let result = config_with(&[(TIMEOUT_VAR, raw)]);
            let error = result.unwrap_err().to_string();
            assert!(error.contains(TIMEOUT_VAR), "{raw}: {error}");
        }
    }

    #[test]
    fn test_invalid_flag() {
        let result = config_with(&[(SHOW_ERRORS_VAR, "maybe")]);
        assert!(result.unwrap_err().to_string().contains(SHOW_ERRORS_VAR));
    }

    #[test]
    fn test_invalid_port() {
        let result = config_with(&[(SERVICE_PORT_VAR, "99999")]);
        assert!(result.unwrap_err().to_string().contains(SERVICE_PORT_VAR));
    }

    #[test]
    fn test_resolve_through_gateway() {
        let api = ApiConfig::for_environment(Environment::Testing).unwrap();
        let endpoint = api
            .resolve(ApiDomain::Product, "detail", Some("17"), CallMode::Gateway)
            .unwrap();

        assert_eq!(endpoint.service, Service::Gateway);
        assert_eq!(
            endpoint.url.as_str(),
            "http://test-gateway.coffee.com/product/17"
        );
    }

    #[test]
    fn test_direct_call_applies_gateway_rewrite() {
        let api = ApiConfig::for_environment(Environment::Development).unwrap();

        let cart = api
            .resolve(ApiDomain::Cart, "list", None, CallMode::Direct)
            .unwrap();
        assert_eq!(cart.service, Service::Cart);
        assert_eq!(cart.url.as_str(), "http://localhost:8085/list");

        let user = api
            .resolve(ApiDomain::User, "login", None, CallMode::Direct)
            .unwrap();
        assert_eq!(user.service, Service::User);
        assert_eq!(user.url.as_str(), "http://localhost:8081/user/login");
    }

    #[test]
    fn test_every_operation_resolves_in_every_environment() {
        for env in Environment::ALL {
            let api = ApiConfig::for_environment(env).unwrap();
            for (domain, name, template) in api.apis.iter() {
                let id = template.has_placeholder().then_some("abc-1");
                for mode in [CallMode::Gateway, CallMode::Direct] {
                    let endpoint = api.resolve(domain, name, id, mode).unwrap();
                    assert!(endpoint.url.query().is_none());
                    assert!(endpoint.url.path().starts_with('/'));
                }
            }
        }
    }

    #[test]
    fn test_identifier_cannot_leave_its_segment() {
        let api = ApiConfig::for_environment(Environment::Development).unwrap();
        for mode in [CallMode::Gateway, CallMode::Direct] {
            for id in [".", ".."] {
                assert_eq!(
                    api.resolve(ApiDomain::Coupon, "detail", Some(id), mode),
                    Err(ConfigError::InvalidIdentifier(id.to_string()))
                );
            }

            for id in ["...", "a/..", "%2e%2e", "x y"] {
                let endpoint = api
                    .resolve(ApiDomain::Product, "detail", Some(id), mode)
                    .unwrap();
                let segments: Vec<&str> = endpoint.url.path_segments().unwrap().collect();
                assert_eq!(segments.len(), 2, "{id} -> {}", endpoint.url);
                assert_eq!(segments[0], "product");
            }
        }
    }

    #[test]
    fn test_resolve_reports_lookup_errors() {
        let api = ApiConfig::for_environment(Environment::Development).unwrap();
        assert!(matches!(
            api.resolve(ApiDomain::Ai, "translate", None, CallMode::Gateway),
            Err(ConfigError::UnknownOperation { .. })
        ));
        assert_eq!(
            api.resolve(ApiDomain::Order, "detail", None, CallMode::Direct),
            Err(ConfigError::MissingIdentifier("/order/{id}"))
        );
    }
}
