//! Session management
//!
//! The session is hydrated from durable storage once at startup, replaced
//! wholesale on login and cleared wholesale on logout. Storage and memory
//! change together on every mutation.

use crate::auth::models::{Role, UserData};
use crate::auth::storage::{SessionStorage, ROLE_KEY, SESSION_KEYS, TOKEN_KEY, USER_KEY};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Current credential, identity and role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserData>,
    pub role: Option<Role>,
}

impl Session {
    /// Explicit role, falling back to the role embedded in the user record
    pub fn resolve_role(&self) -> Option<Role> {
        self.role
            .clone()
            .or_else(|| self.user.as_ref().and_then(UserData::role))
    }

    /// Both a credential and an identity are present
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.resolve_role() == Some(Role::Admin)
    }

    pub fn is_delivery_man(&self) -> bool {
        self.resolve_role() == Some(Role::DeliveryMan)
    }

    /// `CUSTOMER`, or the legacy `USER` alias
    pub fn is_customer(&self) -> bool {
        matches!(self.resolve_role(), Some(Role::Customer | Role::User))
    }

    /// Alias-normalized comparison of the resolved role against `required`
    pub fn role_matches(&self, required: &Role) -> bool {
        self.resolve_role()
            .map(|role| role.matches(required))
            .unwrap_or(false)
    }
}

/// Session state bound to durable storage
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    session: Session,
    loading: bool,
}

impl SessionStore {
    /// Create a store that has not been hydrated yet
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            session: Session::default(),
            loading: true,
        }
    }

    /// Create and hydrate in one step
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        let mut store = Self::new(storage);
        store.initialize();
        store
    }

    /// Hydrate from storage. Corrupt or partial data yields an empty session.
    pub fn initialize(&mut self) {
        self.session = read_persisted(self.storage.as_ref());
        self.loading = false;

        tracing::debug!(
            "Session hydrated: authenticated={}, role={}",
            self.session.is_authenticated(),
            self.session
                .resolve_role()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
    }

    /// Persist and adopt a new session. The role defaults to `CUSTOMER`.
    pub fn login(&mut self, token: impl Into<String>, user: UserData) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::Other("Cannot log in with an empty token".to_string()));
        }

        let role = user.role().unwrap_or(Role::Customer);
        let user_json = serde_json::to_string(&user)?;
        let role_str = role.to_string();

        let previous: Vec<Option<String>> = SESSION_KEYS
            .iter()
            .map(|key| self.storage.get(key))
            .collect();
        let values = [token.as_str(), user_json.as_str(), role_str.as_str()];
        for (written, (key, value)) in SESSION_KEYS.iter().zip(values).enumerate() {
            if let Err(e) = self.storage.set(key, value) {
                tracing::error!("Login could not be persisted: {}", e);
                if !self.restore(&SESSION_KEYS[..written], &previous) {
                    // storage no longer matches memory; adopt what it holds
                    self.session = read_persisted(self.storage.as_ref());
                }
                return Err(e);
            }
        }

        tracing::info!(
            "Login successful: user={}, role={}, token_present=true",
            user.display_name(),
            role
        );

        self.session = Session {
            token: Some(token),
            user: Some(user),
            role: Some(role),
        };
        self.loading = false;
        Ok(())
    }

    /// Put keys back to their values from before a failed login.
    /// Returns false if any key could not be restored.
    fn restore(&self, keys: &[&str], previous: &[Option<String>]) -> bool {
        let mut restored = true;
        for (key, old) in keys.iter().zip(previous) {
            let result = match old {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key),
            };
            if let Err(e) = result {
                tracing::warn!("Failed to roll back session key '{}': {}", key, e);
                restored = false;
            }
        }
        restored
    }

    /// Clear memory and storage. Every key is attempted; the first failure is returned.
    pub fn logout(&mut self) -> Result<()> {
        self.session = Session::default();

        let mut first_err = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("Failed to remove session key '{}': {}", key, e);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        tracing::info!("Logged out");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserData> {
        self.session.user.as_ref()
    }

    pub fn storage(&self) -> Arc<dyn SessionStorage> {
        Arc::clone(&self.storage)
    }

    pub fn resolve_role(&self) -> Option<Role> {
        self.session.resolve_role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn is_delivery_man(&self) -> bool {
        self.session.is_delivery_man()
    }

    pub fn is_customer(&self) -> bool {
        self.session.is_customer()
    }

    pub fn role_matches(&self, required: &Role) -> bool {
        self.session.role_matches(required)
    }
}

fn read_persisted(storage: &dyn SessionStorage) -> Session {
    let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());

    let user = storage
        .get(USER_KEY)
        .and_then(|raw| match serde_json::from_str::<Option<UserData>>(&raw) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored user record: {}", e);
                None
            }
        });

    let (token, user) = match (token, user) {
        (Some(token), Some(user)) => (token, user),
        _ => return Session::default(),
    };

    let role = storage
        .get(ROLE_KEY)
        .as_deref()
        .and_then(Role::parse_opt)
        .or_else(|| user.role());

    Session {
        token: Some(token),
        user: Some(user),
        role,
    }
}
