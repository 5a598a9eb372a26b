//! Shopfront - client side of the storefront and delivery backend
//!
//! Session persistence with role normalization, a route access guard and a
//! REST client that always authenticates with the currently stored token.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;

pub use api::{ApiClient, ApiClientConfig, FailureKind};
pub use auth::{AccessDecision, Role, RouteRequirement, SessionStore};
pub use config::Config;
pub use error::Error;
