//! Per-environment service base URLs

use serde::Serialize;
use url::Url;

use crate::environment::Environment;
use crate::error::ConfigError;

/// One of the endpoints a deployment exposes: the gateway or a backend service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Gateway,
    User,
    Product,
    Order,
    Coupon,
    Cart,
    Ai,
    Statistics,
}

impl Service {
    pub const ALL: [Service; 8] = [
        Service::Gateway,
        Service::User,
        Service::Product,
        Service::Order,
        Service::Coupon,
        Service::Cart,
        Service::Ai,
        Service::Statistics,
    ];

    /// Services reachable directly, bypassing the gateway
    pub const BACKENDS: [Service; 7] = [
        Service::User,
        Service::Product,
        Service::Order,
        Service::Coupon,
        Service::Cart,
        Service::Ai,
        Service::Statistics,
    ];

    /// Key of this service in a URL record
    pub fn key(self) -> &'static str {
        match self {
            Service::Gateway => "gateway",
            Service::User => "userService",
            Service::Product => "productService",
            Service::Order => "orderService",
            Service::Coupon => "couponService",
            Service::Cart => "cartService",
            Service::Ai => "aiService",
            Service::Statistics => "statisticsService",
        }
    }

    /// Name the service registers under
    pub fn registry_name(self) -> &'static str {
        match self {
            Service::Gateway => "coffee-gateway",
            Service::User => "coffee-user-service",
            Service::Product => "coffee-product-service",
            Service::Order => "coffee-order-service",
            Service::Coupon => "coffee-coupon-service",
            Service::Cart => "coffee-cart-service",
            Service::Ai => "coffee-ai-service",
            Service::Statistics => "coffee-statistics-service",
        }
    }
}

struct UrlTable {
    gateway: &'static str,
    user: &'static str,
    product: &'static str,
    order: &'static str,
    coupon: &'static str,
    cart: &'static str,
    ai: &'static str,
    statistics: &'static str,
}

const DEVELOPMENT: UrlTable = UrlTable {
    gateway: "http://localhost:8080",
    user: "http://localhost:8081",
    product: "http://localhost:8082",
    order: "http://localhost:8083",
    coupon: "http://localhost:8084",
    cart: "http://localhost:8085",
    ai: "http://localhost:8086",
    statistics: "http://localhost:8087",
};

const TESTING: UrlTable = UrlTable {
    gateway: "http://test-gateway.coffee.com",
    user: "http://test-user.coffee.com",
    product: "http://test-product.coffee.com",
    order: "http://test-order.coffee.com",
    coupon: "http://test-coupon.coffee.com",
    cart: "http://test-cart.coffee.com",
    ai: "http://test-ai.coffee.com",
    statistics: "http://test-statistics.coffee.com",
};

const PRODUCTION: UrlTable = UrlTable {
    gateway: "https://api.coffee.com",
    user: "https://user.coffee.com",
    product: "https://product.coffee.com",
    order: "https://order.coffee.com",
    coupon: "https://coupon.coffee.com",
    cart: "https://cart.coffee.com",
    ai: "https://ai.coffee.com",
    statistics: "https://statistics.coffee.com",
};

/// Parse an absolute http(s) URL with a host.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Append a relative path to a base URL, keeping any path the base already has.
pub fn join_path(base: &Url, path: &str) -> Result<Url, ConfigError> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| ConfigError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })
}

/// Base URLs of the gateway and every backend service for one environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUrls {
    pub gateway: Url,
    pub user_service: Url,
    pub product_service: Url,
    pub order_service: Url,
    pub coupon_service: Url,
    pub cart_service: Url,
    pub ai_service: Url,
    pub statistics_service: Url,
}

impl ServiceUrls {
    pub fn for_environment(env: Environment) -> Result<Self, ConfigError> {
        let table = match env {
            Environment::Development => &DEVELOPMENT,
            Environment::Testing => &TESTING,
            Environment::Production => &PRODUCTION,
        };
        Self::from_table(table)
    }

    fn from_table(table: &UrlTable) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway: parse_base_url(table.gateway)?,
            user_service: parse_base_url(table.user)?,
            product_service: parse_base_url(table.product)?,
            order_service: parse_base_url(table.order)?,
            coupon_service: parse_base_url(table.coupon)?,
            cart_service: parse_base_url(table.cart)?,
            ai_service: parse_base_url(table.ai)?,
            statistics_service: parse_base_url(table.statistics)?,
        })
    }

    pub fn get(&self, service: Service) -> &Url {
        match service {
            Service::Gateway => &self.gateway,
            Service::User => &self.user_service,
            Service::Product => &self.product_service,
            Service::Order => &self.order_service,
            Service::Coupon => &self.coupon_service,
            Service::Cart => &self.cart_service,
            Service::Ai => &self.ai_service,
            Service::Statistics => &self.statistics_service,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Service, &Url)> {
        Service::ALL.into_iter().map(|service| (service, self.get(service)))
    }

    /// The backend URLs used when bypassing the gateway
    pub fn direct(&self) -> DirectUrls {
        DirectUrls {
            user_service: self.user_service.clone(),
            product_service: self.product_service.clone(),
            order_service: self.order_service.clone(),
            coupon_service: self.coupon_service.clone(),
            cart_service: self.cart_service.clone(),
            ai_service: self.ai_service.clone(),
            statistics_service: self.statistics_service.clone(),
        }
    }
}

/// Backend base URLs for direct calls that bypass the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectUrls {
    pub user_service: Url,
    pub product_service: Url,
    pub order_service: Url,
    pub coupon_service: Url,
    pub cart_service: Url,
    pub ai_service: Url,
    pub statistics_service: Url,
}

impl DirectUrls {
    /// Base URL of a backend service; the gateway has no direct entry.
    pub fn get(&self, service: Service) -> Option<&Url> {
        match service {
            Service::Gateway => None,
            Service::User => Some(&self.user_service),
            Service::Product => Some(&self.product_service),
            Service::Order => Some(&self.order_service),
            Service::Coupon => Some(&self.coupon_service),
            Service::Cart => Some(&self.cart_service),
            Service::Ai => Some(&self.ai_service),
            Service::Statistics => Some(&self.statistics_service),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Service, &Url)> {
        Service::BACKENDS
            .into_iter()
            .filter_map(|service| self.get(service).map(|url| (service, url)))
    }
}
