//! Error types for Shopfront

use thiserror::Error;

use crate::api::FailureKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        kind: Option<FailureKind>,
        message: String,
    },

    #[error("Session storage error for '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No route matches '{0}'")]
    RouteNotFound(String),

    #[error("Config file not found. Run 'shopfront init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Classification of an API failure, if this error came from a response
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Error::Api { kind, .. } => *kind,
            _ => None,
        }
    }

    /// HTTP status of an API failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
