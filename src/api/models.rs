//! Request and response shapes the client constructs or interprets itself.
//! Other payloads pass through as caller-supplied JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::UserData;
use crate::error::{Error, Result};

/// Body of `POST /cart/items`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// Body of `PUT /cart/items/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Body of `PATCH /orders/{id}/status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

/// Body of `POST /delivery/orders/{id}/update-status`
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryStatusUpdate {
    pub status: String,
}

/// Credentials for the password login endpoints
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// Identifiers containing `@` are sent as `email`, anything else as `username`
    pub fn new(identifier: &str, password: impl Into<String>) -> Self {
        let (username, email) = if identifier.contains('@') {
            (None, Some(identifier.to_string()))
        } else {
            (Some(identifier.to_string()), None)
        };
        Self {
            username,
            email,
            password: password.into(),
        }
    }
}

/// Token and identity extracted from a login response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserData,
}

impl AuthResponse {
    /// Accepts `{token, user: {...}}`, or a flat object whose non-token
    /// fields are the identity record
    pub fn from_value(value: Value) -> Result<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::InvalidResponse(format!(
                    "expected a login object, got {}",
                    other
                )))
            }
        };

        let token = match object.remove("token") {
            Some(Value::String(token)) if !token.is_empty() => token,
            _ => return Err(Error::InvalidResponse("login response has no token".to_string())),
        };

        let user = match object.remove("user") {
            Some(user @ Value::Object(_)) => serde_json::from_value(user)?,
            _ => serde_json::from_value(Value::Object(object))?,
        };

        Ok(Self { token, user })
    }
}
