//! Shopping cart endpoints

use serde_json::Value;

use super::client::ApiClient;
use super::models::{AddToCartRequest, UpdateCartItemRequest};
use crate::error::Result;

pub const DEFAULT_QUANTITY: u32 = 1;

impl ApiClient {
    pub async fn get_cart(&self) -> Result<Value> {
        self.get("/cart").await
    }

    /// `quantity` defaults to one
    pub async fn add_to_cart(&self, product_id: i64, quantity: Option<u32>) -> Result<Value> {
        let payload = AddToCartRequest {
            product_id,
            quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
        };
        self.post("/cart/items", &payload).await
    }

    pub async fn update_cart_item(&self, item_id: i64, quantity: u32) -> Result<Value> {
        self.put(
            &format!("/cart/items/{}", item_id),
            &UpdateCartItemRequest { quantity },
        )
        .await
    }

    pub async fn remove_cart_item(&self, item_id: i64) -> Result<Value> {
        self.delete(&format!("/cart/items/{}", item_id)).await
    }

    pub async fn clear_cart(&self) -> Result<Value> {
        self.delete("/cart").await
    }
}
