//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles issued by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Shopper - cart, checkout, own orders
    Customer,
    /// Legacy alias for `Customer`, still accepted wherever roles are compared
    User,
    /// Administrator - products, stock, suppliers, reports, users
    Admin,
    /// Courier - assigned and available deliveries
    DeliveryMan,
    /// Any role string this client does not know about
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::DeliveryMan => "DELIVERY_MAN",
            Role::Other(s) => s,
        }
    }

    /// Canonical form: the legacy `USER` alias becomes `CUSTOMER`
    pub fn normalized(&self) -> Role {
        match self {
            Role::User => Role::Customer,
            other => other.clone(),
        }
    }

    /// Whether this role satisfies `required`, treating `USER` and `CUSTOMER` as equal
    pub fn matches(&self, required: &Role) -> bool {
        self.normalized() == required.normalized()
    }

    /// Parse a role string, treating empty strings as absent
    pub fn parse_opt(s: &str) -> Option<Role> {
        if s.is_empty() {
            None
        } else {
            Some(Role::from(s))
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "CUSTOMER" => Role::Customer,
            "USER" => Role::User,
            "ADMIN" => Role::Admin,
            "DELIVERY_MAN" => Role::DeliveryMan,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity record as returned by the backend.
///
/// Fields this client does not interpret are kept in `extra` so the record
/// written to storage is the backend's record unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserData {
    /// Build a bare identity with just a username and role
    pub fn new(username: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            username: Some(username.into()),
            role: role.map(String::from),
            ..Default::default()
        }
    }

    /// Role embedded in the record, if any
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse_opt)
    }

    /// Best human-readable identifier
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("unknown")
    }
}
