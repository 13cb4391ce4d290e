//! REST path templates of the backend services, grouped by API domain

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;
use crate::services::Service;

/// Placeholder a template uses for an identifier segment
pub const PLACEHOLDER: &str = "{id}";

/// A group of operations served by one backend service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiDomain {
    User,
    Product,
    Order,
    Coupon,
    Cart,
    Ai,
    Statistics,
}

impl ApiDomain {
    pub const ALL: [ApiDomain; 7] = [
        ApiDomain::User,
        ApiDomain::Product,
        ApiDomain::Order,
        ApiDomain::Coupon,
        ApiDomain::Cart,
        ApiDomain::Ai,
        ApiDomain::Statistics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApiDomain::User => "user",
            ApiDomain::Product => "product",
            ApiDomain::Order => "order",
            ApiDomain::Coupon => "coupon",
            ApiDomain::Cart => "cart",
            ApiDomain::Ai => "ai",
            ApiDomain::Statistics => "statistics",
        }
    }

    /// Backend service that owns this domain
    pub fn service(self) -> Service {
        match self {
            ApiDomain::User => Service::User,
            ApiDomain::Product => Service::Product,
            ApiDomain::Order => Service::Order,
            ApiDomain::Coupon => Service::Coupon,
            ApiDomain::Cart => Service::Cart,
            ApiDomain::Ai => Service::Ai,
            ApiDomain::Statistics => Service::Statistics,
        }
    }
}

impl FromStr for ApiDomain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownDomain(s.to_string()))
    }
}

impl fmt::Display for ApiDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relative request path, optionally holding one `{id}` segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn has_placeholder(&self) -> bool {
        self.0.contains(PLACEHOLDER)
    }

    /// Produce a concrete path.
    ///
    /// The identifier is required exactly when the template has a placeholder.
    /// It is percent-encoded so it always stays a single path segment; the
    /// dot segments `.` and `..` are rejected since URL parsing would
    /// collapse them.
    pub fn render(&self, id: Option<&str>) -> Result<String, ConfigError> {
        match (self.has_placeholder(), id) {
            (true, Some("")) => Err(ConfigError::EmptyIdentifier),
            (true, Some(id @ ("." | ".."))) => Err(ConfigError::InvalidIdentifier(id.to_string())),
            (true, Some(id)) => Ok(self.0.replacen(PLACEHOLDER, &urlencoding::encode(id), 1)),
            (true, None) => Err(ConfigError::MissingIdentifier(self.0)),
            (false, Some(_)) => Err(ConfigError::UnexpectedIdentifier(self.0)),
            (false, None) => Ok(self.0.to_string()),
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

type Operations = &'static [(&'static str, PathTemplate)];

const USER: Operations = &[
    ("login", PathTemplate::new("/user/login")),
    ("register", PathTemplate::new("/user/register")),
    ("info", PathTemplate::new("/user/info")),
    ("list", PathTemplate::new("/user/list")),
    ("update", PathTemplate::new("/user/update")),
    ("delete", PathTemplate::new("/user/delete")),
    ("points", PathTemplate::new("/user/points")),
    ("memberLevel", PathTemplate::new("/user/member-level")),
];

const PRODUCT: Operations = &[
    ("list", PathTemplate::new("/product/list")),
    ("detail", PathTemplate::new("/product/{id}")),
    ("add", PathTemplate::new("/product/add")),
    ("update", PathTemplate::new("/product/update")),
    ("delete", PathTemplate::new("/product/delete")),
    ("recommended", PathTemplate::new("/product/recommended")),
    ("hot", PathTemplate::new("/product/hot")),
    ("stock", PathTemplate::new("/product/stock")),
];

const ORDER: Operations = &[
    ("list", PathTemplate::new("/order/list")),
    ("detail", PathTemplate::new("/order/{id}")),
    ("create", PathTemplate::new("/order/create")),
    ("update", PathTemplate::new("/order/update")),
    ("cancel", PathTemplate::new("/order/cancel")),
    ("pay", PathTemplate::new("/order/pay")),
];

const COUPON: Operations = &[
    ("list", PathTemplate::new("/coupon/list")),
    ("detail", PathTemplate::new("/coupon/{id}")),
    ("add", PathTemplate::new("/coupon/add")),
    ("update", PathTemplate::new("/coupon/update")),
    ("delete", PathTemplate::new("/coupon/delete")),
    ("use", PathTemplate::new("/coupon/use")),
    ("seckill", PathTemplate::new("/coupon/seckill")),
];

const CART: Operations = &[
    ("list", PathTemplate::new("/cart/list")),
    ("add", PathTemplate::new("/cart/add")),
    ("update", PathTemplate::new("/cart/update")),
    ("delete", PathTemplate::new("/cart/delete")),
    ("clear", PathTemplate::new("/cart/clear")),
];

const AI: Operations = &[
    ("chat", PathTemplate::new("/ai/chat")),
    ("recommend", PathTemplate::new("/ai/recommend")),
    ("analyze", PathTemplate::new("/ai/analyze")),
];

const STATISTICS: Operations = &[
    ("sales", PathTemplate::new("/statistics/sales")),
    ("users", PathTemplate::new("/statistics/users")),
    ("products", PathTemplate::new("/statistics/products")),
    ("orders", PathTemplate::new("/statistics/orders")),
];

fn operations_of(domain: ApiDomain) -> Operations {
    match domain {
        ApiDomain::User => USER,
        ApiDomain::Product => PRODUCT,
        ApiDomain::Order => ORDER,
        ApiDomain::Coupon => COUPON,
        ApiDomain::Cart => CART,
        ApiDomain::Ai => AI,
        ApiDomain::Statistics => STATISTICS,
    }
}

/// Operation name to path template, per API domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathCatalog {
    entries: BTreeMap<ApiDomain, BTreeMap<&'static str, PathTemplate>>,
}

impl PathCatalog {
    pub fn standard() -> Self {
        let entries = ApiDomain::ALL
            .into_iter()
            .map(|domain| (domain, operations_of(domain).iter().copied().collect()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, domain: ApiDomain, operation: &str) -> Result<PathTemplate, ConfigError> {
        self.entries
            .get(&domain)
            .and_then(|ops| ops.get(operation))
            .copied()
            .ok_or_else(|| ConfigError::UnknownOperation {
                domain: domain.to_string(),
                operation: operation.to_string(),
            })
    }

    pub fn operations(
        &self,
        domain: ApiDomain,
    ) -> impl Iterator<Item = (&'static str, PathTemplate)> + '_ {
        self.entries
            .get(&domain)
            .into_iter()
            .flat_map(|ops| ops.iter().map(|(name, template)| (*name, *template)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ApiDomain, &'static str, PathTemplate)> + '_ {
        self.entries.iter().flat_map(|(domain, ops)| {
            ops.iter()
                .map(move |(name, template)| (*domain, *name, *template))
        })
    }
}

impl Default for PathCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_domain() {
        let catalog = PathCatalog::standard();
        for domain in ApiDomain::ALL {
            assert!(catalog.operations(domain).count() > 0, "{domain} is empty");
        }
        assert_eq!(catalog.iter().count(), 41);
    }

    #[test]
    fn test_templates_live_under_their_domain() {
        let catalog = PathCatalog::standard();
        for (domain, name, template) in catalog.iter() {
            let prefix = format!("/{}/", domain.as_str());
            assert!(
                template.as_str().starts_with(&prefix),
                "{domain}.{name} = {template}"
            );
        }
    }

    #[test]
    fn test_placeholder_templates_render_valid_paths() {
        let catalog = PathCatalog::standard();
        let with_placeholder: Vec<_> = catalog
            .iter()
            .filter(|(_, _, template)| template.has_placeholder())
            .collect();
        assert_eq!(with_placeholder.len(), 3);

        for (domain, name, template) in with_placeholder {
            assert_eq!(template.as_str().matches(PLACEHOLDER).count(), 1);
            let path = template.render(Some("42")).unwrap();
            assert!(path.starts_with('/'), "{domain}.{name} -> {path}");
            assert!(!path.contains('{') && !path.contains('}'));
            assert!(path.ends_with("/42"));
        }
    }

    #[test]
    fn test_identifier_stays_one_segment() {
        let template = PathTemplate::new("/order/{id}");
        assert_eq!(
            template.render(Some("a/b?c")).unwrap(),
            "/order/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let template = PathTemplate::new("/product/{id}");
        for id in [".", ".."] {
            assert_eq!(
                template.render(Some(id)),
                Err(ConfigError::InvalidIdentifier(id.to_string()))
            );
        }
        assert_eq!(template.render(Some("...")).unwrap(), "/product/...");
        assert_eq!(template.render(Some("v1.2")).unwrap(), "/product/v1.2");
    }

    #[test]
    fn test_render_argument_must_match_template() {
        let detail = PathTemplate::new("/product/{id}");
        let list = PathTemplate::new("/product/list");

        assert_eq!(
            detail.render(None),
            Err(ConfigError::MissingIdentifier("/product/{id}"))
        );
        assert_eq!(detail.render(Some("")), Err(ConfigError::EmptyIdentifier));
        assert_eq!(
            list.render(Some("7")),
            Err(ConfigError::UnexpectedIdentifier("/product/list"))
        );
        assert_eq!(list.render(None).unwrap(), "/product/list");
    }

    #[test]
    fn test_lookup() {
        let catalog = PathCatalog::standard();
        assert_eq!(
            catalog.get(ApiDomain::User, "memberLevel").unwrap().as_str(),
            "/user/member-level"
        );
        assert_eq!(
            catalog.get(ApiDomain::Cart, "checkout"),
            Err(ConfigError::UnknownOperation {
                domain: "cart".to_string(),
                operation: "checkout".to_string(),
            })
        );
    }

    #[test]
    fn test_domain_parsing() {
        assert_eq!("statistics".parse::<ApiDomain>().unwrap(), ApiDomain::Statistics);
        assert_eq!(
            "shipping".parse::<ApiDomain>(),
            Err(ConfigError::UnknownDomain("shipping".to_string()))
        );
    }

    #[test]
    fn test_catalog_serializes_as_nested_map() {
        let value = serde_json::to_value(PathCatalog::standard()).unwrap();
        assert_eq!(value["product"]["detail"], "/product/{id}");
        assert_eq!(value["ai"]["chat"], "/ai/chat");
    }
}
