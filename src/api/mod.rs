//! REST client for the storefront backend
//!
//! One method per backend endpoint, grouped by resource family. Each is a
//! thin mapping from parameters to a request; responses are returned as JSON.

mod auth;
mod cart;
pub mod client;
mod delivery;
pub mod failure;
mod inventory;
pub mod models;
mod orders;
mod products;
mod reviews;

pub use cart::DEFAULT_QUANTITY;
pub use client::{ApiClient, ApiClientConfig, Body};
pub use failure::FailureKind;
pub use models::{
    AddToCartRequest, AuthResponse, DeliveryStatusUpdate, LoginRequest, OrderStatusUpdate,
    UpdateCartItemRequest,
};
