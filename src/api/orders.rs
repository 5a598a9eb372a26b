//! Order and tracking endpoints

use serde::Serialize;
use serde_json::Value;

use super::client::{segment, ApiClient};
use super::models::OrderStatusUpdate;
use crate::error::Result;

impl ApiClient {
    pub async fn create_order<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/orders", data).await
    }

    pub async fn get_order(&self, id: i64) -> Result<Value> {
        self.get(&format!("/orders/{}", id)).await
    }

    pub async fn get_my_orders(&self) -> Result<Value> {
        self.get("/orders/customer/me").await
    }

    pub async fn get_customer_orders(&self, customer_id: i64) -> Result<Value> {
        self.get(&format!("/orders/customer/{}", customer_id)).await
    }

    pub async fn get_all_orders(&self) -> Result<Value> {
        let orders = self.get("/orders/all").await?;
        if let Some(list) = orders.as_array() {
            tracing::debug!("Orders response received: {} orders", list.len());
        }
        Ok(orders)
    }

    /// `cancellation_reason` is only sent when given
    pub async fn update_order_status(
        &self,
        id: i64,
        status: impl Into<String>,
        cancellation_reason: Option<String>,
    ) -> Result<Value> {
        let payload = OrderStatusUpdate {
            status: status.into(),
            cancellation_reason: cancellation_reason.filter(|r| !r.is_empty()),
        };
        self.patch(&format!("/orders/{}/status", id), &payload).await
    }

    pub async fn get_tracking(&self, id: i64) -> Result<Value> {
        self.get(&format!("/orders/{}/tracking", id)).await
    }

    pub async fn get_location_tracking(&self, id: i64) -> Result<Value> {
        self.get(&format!("/orders/{}/location-tracking", id)).await
    }

    pub async fn get_order_by_order_number(&self, order_number: &str) -> Result<Value> {
        self.get(&format!("/orders/by-order-number/{}", segment(order_number)))
            .await
    }

    pub async fn get_order_by_tracking_id(&self, tracking_id: &str) -> Result<Value> {
        self.get(&format!("/orders/by-tracking-id/{}", segment(tracking_id)))
            .await
    }
}
