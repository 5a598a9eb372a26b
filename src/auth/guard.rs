//! Route access guard
//!
//! A pure decision over the current session and a route's requirement.

use crate::auth::models::Role;
use crate::auth::session::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const HOME_PATH: &str = "/";

/// What a route demands of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    /// Legacy flag: only `ADMIN` may pass, and logged-out users go to the admin login
    pub admin_only: bool,
    pub required_role: Option<Role>,
    /// Any one of these roles passes; empty means no constraint
    pub allowed_roles: Vec<Role>,
}

impl RouteRequirement {
    /// Any logged-in user
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn require(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    pub fn allow(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = roles.into_iter().collect();
        self
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session is still hydrating; no decision yet
    Pending,
    Allow,
    Deny { redirect: &'static str },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn redirect(&self) -> Option<&'static str> {
        match *self {
            AccessDecision::Deny { redirect } => Some(redirect),
            _ => None,
        }
    }
}

/// Decide whether the session may enter a route with `requirement`
pub fn evaluate(store: &SessionStore, requirement: &RouteRequirement) -> AccessDecision {
    if store.is_loading() {
        return AccessDecision::Pending;
    }

    if !store.is_authenticated() {
        let redirect = if requirement.admin_only {
            ADMIN_LOGIN_PATH
        } else {
            LOGIN_PATH
        };
        tracing::info!("No user or token, redirecting to {}", redirect);
        return AccessDecision::Deny { redirect };
    }

    let current = store.resolve_role();
    tracing::debug!(
        "Checking access: role={:?}, admin_only={}, required={:?}, allowed={:?}",
        current,
        requirement.admin_only,
        requirement.required_role,
        requirement.allowed_roles
    );

    if requirement.admin_only && !store.is_admin() {
        tracing::info!("Admin-only route, but role is {:?}", current);
        return AccessDecision::Deny {
            redirect: HOME_PATH,
        };
    }

    if let Some(required) = &requirement.required_role {
        if !store.role_matches(required) {
            tracing::info!("Required role {} not met by {:?}", required, current);
            return AccessDecision::Deny {
                redirect: HOME_PATH,
            };
        }
    }

    if !requirement.allowed_roles.is_empty()
        && !requirement
            .allowed_roles
            .iter()
            .any(|allowed| store.role_matches(allowed))
    {
        tracing::info!(
            "Role {:?} not in allowed roles {:?}",
            current,
            requirement.allowed_roles
        );
        return AccessDecision::Deny {
            redirect: HOME_PATH,
        };
    }

    tracing::debug!("Access granted");
    AccessDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserData;
    use crate::auth::storage::MemoryStorage;
    use std::sync::Arc;

    fn store_with(role: Option<Role>) -> SessionStore {
        let mut store = SessionStore::open(Arc::new(MemoryStorage::new()));
        if let Some(role) = role {
            store.login("tok", UserData::new("someone", Some(role))).unwrap();
        }
        store
    }

    #[test]
    fn test_pending_while_hydrating() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(
            evaluate(&store, &RouteRequirement::authenticated()),
            AccessDecision::Pending
        );
    }

    #[test]
    fn test_logged_out_redirects() {
        let store = store_with(None);
        assert_eq!(
            evaluate(&store, &RouteRequirement::authenticated()).redirect(),
            Some(LOGIN_PATH)
        );
        assert_eq!(
            evaluate(&store, &RouteRequirement::default().admin_only()).redirect(),
            Some(ADMIN_LOGIN_PATH)
        );
    }

    #[test]
    fn test_admin_only_flag() {
        let req = RouteRequirement::default().admin_only();
        assert!(evaluate(&store_with(Some(Role::Admin)), &req).is_allowed());
        assert_eq!(
            evaluate(&store_with(Some(Role::Customer)), &req).redirect(),
            Some(HOME_PATH)
        );
    }

    #[test]
    fn test_empty_allowed_roles_is_unconstrained() {
        let req = RouteRequirement::authenticated().allow(Vec::new());
        assert!(evaluate(&store_with(Some(Role::DeliveryMan)), &req).is_allowed());
    }

    #[test]
    fn test_all_checks_must_pass() {
        let req = RouteRequirement::default()
            .require(Role::Admin)
            .allow([Role::DeliveryMan]);
        assert_eq!(
            evaluate(&store_with(Some(Role::Admin)), &req),
            AccessDecision::Deny { redirect: HOME_PATH }
        );
    }
}
