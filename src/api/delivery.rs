//! Courier endpoints

use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use super::models::DeliveryStatusUpdate;
use crate::error::Result;

impl ApiClient {
    pub async fn get_my_delivery_orders(&self) -> Result<Value> {
        self.get("/delivery/my-orders").await
    }

    pub async fn get_available_orders(&self) -> Result<Value> {
        self.get("/delivery/available-orders").await
    }

    pub async fn accept_order(&self, order_id: i64) -> Result<Value> {
        self.post_empty(&format!("/delivery/orders/{}/accept", order_id))
            .await
    }

    pub async fn update_delivery_order_status(
        &self,
        order_id: i64,
        status: impl Into<String>,
    ) -> Result<Value> {
        let payload = DeliveryStatusUpdate {
            status: status.into(),
        };
        self.post(&format!("/delivery/orders/{}/update-status", order_id), &payload)
            .await
    }

    pub async fn update_delivery_location<T: Serialize + ?Sized>(
        &self,
        order_id: i64,
        location: &T,
    ) -> Result<Value> {
        self.post(&format!("/delivery/orders/{}/update-location", order_id), location)
            .await
    }

    pub async fn get_delivery_order_details(&self, order_id: i64) -> Result<Value> {
        self.get(&format!("/delivery/orders/{}", order_id)).await
    }

    pub async fn generate_fake_locations(&self, order_id: i64) -> Result<Value> {
        self.post_empty(&format!("/delivery/orders/{}/generate-fake-locations", order_id))
            .await
    }
}
