//! Application route table
//!
//! Every page of the storefront with the requirement its guard enforces.
//! Routes without a requirement are public.

use crate::auth::guard::{evaluate, AccessDecision, RouteRequirement};
use crate::auth::{Role, SessionStore};

/// A page path pattern, possibly containing `:param` segments
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub requirement: Option<RouteRequirement>,
}

impl Route {
    fn public(path: &'static str) -> Self {
        Self {
            path,
            requirement: None,
        }
    }

    fn guarded(path: &'static str, requirement: RouteRequirement) -> Self {
        Self {
            path,
            requirement: Some(requirement),
        }
    }

    fn role(path: &'static str, role: Role) -> Self {
        Self::guarded(path, RouteRequirement::default().require(role))
    }

    /// Whether `path` matches this route's pattern
    pub fn matches(&self, path: &str) -> bool {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        if self.path == path {
            return true;
        }

        let pattern: Vec<&str> = self.path.split('/').collect();
        let actual: Vec<&str> = path.split('/').collect();
        pattern.len() == actual.len()
            && pattern.iter().zip(&actual).all(|(p, a)| {
                if p.starts_with(':') {
                    !a.is_empty()
                } else {
                    p == a
                }
            })
    }
}

/// All routes of the application
pub fn route_table() -> Vec<Route> {
    vec![
        // Customer
        Route::public("/"),
        Route::public("/login"),
        Route::role("/cart", Role::Customer),
        Route::role("/checkout", Role::Customer),
        Route::role("/orders", Role::Customer),
        Route::public("/track"),
        Route::public("/track/:orderId"),
        Route::guarded("/profile", RouteRequirement::authenticated()),
        // Admin
        Route::public("/admin/login"),
        Route::role("/admin/dashboard", Role::Admin),
        Route::role("/admin/products", Role::Admin),
        Route::role("/admin/stock", Role::Admin),
        Route::role("/admin/suppliers", Role::Admin),
        Route::role("/admin/reports", Role::Admin),
        Route::role("/admin/orders", Role::Admin),
        Route::role("/delivery", Role::DeliveryMan),
        Route::role("/admin/users", Role::Admin),
    ]
}

/// Find the route serving `path`
pub fn resolve(path: &str) -> Option<Route> {
    route_table().into_iter().find(|route| route.matches(path))
}

/// Guard decision for navigating to `path`; `None` when no route serves it
pub fn check_path(store: &SessionStore, path: &str) -> Option<AccessDecision> {
    let route = resolve(path)?;
    Some(match &route.requirement {
        Some(requirement) => evaluate(store, requirement),
        None => AccessDecision::Allow,
    })
}
