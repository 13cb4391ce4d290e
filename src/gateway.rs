//! Gateway route table
//!
//! Mirrors how the API gateway forwards a public path to a backend service.
//! Direct calls need this: some services only see the path after the gateway
//! stripped or rewrote its prefix, so the public path cannot be sent to them
//! unchanged.

use crate::error::ConfigError;
use crate::services::Service;

/// How the gateway changes a path before forwarding it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRewrite {
    /// Forward the path as is
    Keep,
    /// Drop this many leading segments
    StripPrefix(usize),
    /// Replace a leading prefix, keeping the remainder
    Replace {
        from: &'static str,
        to: &'static str,
    },
}

impl PathRewrite {
    pub fn apply(&self, path: &str) -> String {
        match *self {
            PathRewrite::Keep => path.to_string(),
            PathRewrite::StripPrefix(count) => {
                // Keep the remainder verbatim, including empty segments and a trailing slash.
                let mut rest = path;
                for _ in 0..count {
                    let segment_start = rest.strip_prefix('/').unwrap_or(rest);
                    rest = match segment_start.find('/') {
                        Some(idx) => &segment_start[idx..],
                        None => "",
                    };
                }
                if rest.is_empty() {
                    "/".to_string()
                } else {
                    rest.to_string()
                }
            }
            PathRewrite::Replace { from, to } => match path.strip_prefix(from) {
                Some(rest) => format!("{to}{rest}"),
                None => path.to_string(),
            },
        }
    }
}

/// One forwarding rule of the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayRoute {
    pub id: &'static str,
    /// Matches the prefix itself and everything below it
    pub prefix: &'static str,
    pub service: Service,
    pub rewrite: PathRewrite,
}

impl GatewayRoute {
    const fn new(
        id: &'static str,
        prefix: &'static str,
        service: Service,
        rewrite: PathRewrite,
    ) -> Self {
        Self {
            id,
            prefix,
            service,
            rewrite,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Path the backend service receives for `path`
    pub fn downstream_path(&self, path: &str) -> String {
        self.rewrite.apply(path)
    }
}

const fn replace(from: &'static str, to: &'static str) -> PathRewrite {
    PathRewrite::Replace { from, to }
}

// Order matters: more specific prefixes come before the broader ones they overlap.
const STANDARD_ROUTES: &[GatewayRoute] = &[
    GatewayRoute::new("address-service", "/address", Service::User, PathRewrite::Keep),
    GatewayRoute::new("user-coupon-service", "/user/coupons", Service::Coupon, PathRewrite::Keep),
    GatewayRoute::new("user-service", "/user", Service::User, PathRewrite::Keep),
    GatewayRoute::new("product-service", "/product", Service::Product, PathRewrite::Keep),
    GatewayRoute::new("order-service", "/order", Service::Order, PathRewrite::Keep),
    GatewayRoute::new("coupon-service", "/coupon", Service::Coupon, PathRewrite::StripPrefix(1)),
    GatewayRoute::new("cart-service", "/cart", Service::Cart, PathRewrite::StripPrefix(1)),
    GatewayRoute::new("ai-service", "/ai", Service::Ai, PathRewrite::StripPrefix(1)),
    GatewayRoute::new(
        "statistics-service",
        "/statistics",
        Service::Statistics,
        PathRewrite::StripPrefix(1),
    ),
    GatewayRoute::new(
        "admin-product-service",
        "/admin/products",
        Service::Product,
        replace("/admin/products", "/product/list"),
    ),
    GatewayRoute::new(
        "admin-order-service",
        "/admin/orders",
        Service::Order,
        replace("/admin/orders", "/order/list"),
    ),
    GatewayRoute::new(
        "admin-user-service",
        "/admin/users",
        Service::User,
        replace("/admin/users", "/user/list"),
    ),
    GatewayRoute::new(
        "admin-statistics-service",
        "/admin/statistics",
        Service::Statistics,
        replace("/admin/statistics", "/statistics"),
    ),
    GatewayRoute::new(
        "admin-coupon-service",
        "/admin/coupons",
        Service::Coupon,
        replace("/admin/coupons", "/coupon"),
    ),
    GatewayRoute::new(
        "admin-seckill-service",
        "/admin/coupon-seckill",
        Service::Coupon,
        replace("/admin/coupon-seckill", "/coupon/seckill"),
    ),
];

/// Ordered gateway routes; the first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRoutes {
    routes: Vec<GatewayRoute>,
}

impl GatewayRoutes {
    pub fn standard() -> Self {
        Self {
            routes: STANDARD_ROUTES.to_vec(),
        }
    }

    pub fn route(&self, path: &str) -> Result<&GatewayRoute, ConfigError> {
        self.routes
            .iter()
            .find(|route| route.matches(path))
            .ok_or_else(|| ConfigError::NoRoute(path.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GatewayRoute> {
        self.routes.iter()
    }
}

impl Default for GatewayRoutes {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathCatalog;

    #[test]
    fn test_prefix_matches_whole_segments_only() {
        let routes = GatewayRoutes::standard();
        assert_eq!(routes.route("/user").unwrap().id, "user-service");
        assert_eq!(routes.route("/user/login").unwrap().id, "user-service");
        assert!(matches!(
            routes.route("/username"),
            Err(ConfigError::NoRoute(_))
        ));
    }

    #[test]
    fn test_specific_routes_win_over_broad_ones() {
        let routes = GatewayRoutes::standard();
        let route = routes.route("/user/coupons/available").unwrap();
        assert_eq!(route.id, "user-coupon-service");
        assert_eq!(route.service, Service::Coupon);
        assert_eq!(route.downstream_path("/user/coupons/available"), "/user/coupons/available");
    }

    #[test]
    fn test_strip_prefix_drops_first_segment() {
        let routes = GatewayRoutes::standard();
        let route = routes.route("/cart/list").unwrap();
        assert_eq!(route.downstream_path("/cart/list"), "/list");
        assert_eq!(route.downstream_path("/cart"), "/");
    }

    #[test]
    fn test_strip_prefix_keeps_remainder_verbatim() {
        let strip = PathRewrite::StripPrefix(1);
        assert_eq!(strip.apply("/cart/list/"), "/list/");
        assert_eq!(strip.apply("/cart//list"), "//list");
        assert_eq!(strip.apply("/cart/"), "/");
        assert_eq!(PathRewrite::StripPrefix(2).apply("/a/b/c/d"), "/c/d");
        assert_eq!(PathRewrite::StripPrefix(2).apply("/a"), "/");
    }

    #[test]
    fn test_admin_routes_rewrite_to_service_paths() {
        let routes = GatewayRoutes::standard();
        let cases = [
            ("/admin/products", "/product/list", Service::Product),
            ("/admin/orders/page", "/order/list/page", Service::Order),
            ("/admin/users", "/user/list", Service::User),
            ("/admin/statistics/sales", "/statistics/sales", Service::Statistics),
            ("/admin/coupons/3", "/coupon/3", Service::Coupon),
            ("/admin/coupon-seckill/start", "/coupon/seckill/start", Service::Coupon),
        ];

        for (path, downstream, service) in cases {
            let route = routes.route(path).unwrap();
            assert_eq!(route.service, service, "{path}");
            assert_eq!(route.downstream_path(path), downstream);
        }
    }

    #[test]
    fn test_admin_coupons_does_not_shadow_seckill() {
        let routes = GatewayRoutes::standard();
        assert_eq!(
            routes.route("/admin/coupon-seckill").unwrap().id,
            "admin-seckill-service"
        );
    }

    #[test]
    fn test_every_catalog_path_has_a_route_to_its_service() {
        let routes = GatewayRoutes::standard();
        for (domain, name, template) in PathCatalog::standard().iter() {
            let path = template.render(template.has_placeholder().then_some("1")).unwrap();
            let route = routes.route(&path).unwrap();
            assert_eq!(route.service, domain.service(), "{domain}.{name}");
        }
    }
}
