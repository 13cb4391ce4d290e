//! Endpoint configuration for the coffee shop microservices.
//!
//! An [`ApiConfig`] is built once from the environment indicator and then
//! handed to whatever needs to reach the backend:
//!
//! ```rust,ignore
//! use coffee_api_config::{ApiConfig, ApiDomain, CallMode, Environment};
//!
//! let env = Environment::resolve(std::env::var("COFFEE_ENV").ok().as_deref())?;
//! let api = ApiConfig::for_environment(env)?;
//! let detail = api.resolve(ApiDomain::Product, "detail", Some("42"), CallMode::Gateway)?;
//! ```

pub mod api_doc;
pub mod config;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod paths;
pub mod request;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ApiConfig, CallMode, Config, ResolvedEndpoint};
pub use environment::Environment;
pub use error::ConfigError;
pub use gateway::{GatewayRoute, GatewayRoutes, PathRewrite};
pub use paths::{ApiDomain, PathCatalog, PathTemplate};
pub use request::{AuthConfig, ErrorReporting, RequestConfig};
pub use services::{DirectUrls, Service, ServiceUrls};
