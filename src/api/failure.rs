//! Classification of failed responses
//!
//! Classification is observation only: the client never retries, redirects
//! or tears down the session because of it.

use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 401 - missing, expired or rejected credential
    Authentication,
    /// 403 - authenticated but not permitted
    Authorization,
    /// 5xx
    Server,
}

impl FailureKind {
    pub fn classify(status: StatusCode) -> Option<Self> {
        Self::classify_code(status.as_u16())
    }

    pub fn classify_code(status: u16) -> Option<Self> {
        match status {
            401 => Some(FailureKind::Authentication),
            403 => Some(FailureKind::Authorization),
            s if s >= 500 => Some(FailureKind::Server),
            _ => None,
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            FailureKind::Authentication => "Authentication failed",
            FailureKind::Authorization => "Access denied",
            FailureKind::Server => "Server error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Authentication => write!(f, "authentication failure"),
            FailureKind::Authorization => write!(f, "authorization failure"),
            FailureKind::Server => write!(f, "server failure"),
        }
    }
}

/// Human-readable message for a failed response: the body's `error` or
/// `message` field when present, otherwise a default for the status
pub fn failure_message(status: StatusCode, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|field| v.get(field).and_then(|m| m.as_str()).map(str::to_string))
        });

    if let Some(message) = from_body {
        return message;
    }

    match FailureKind::classify(status) {
        Some(FailureKind::Server) | None => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
        Some(kind) => kind.default_message().to_string(),
    }
}
