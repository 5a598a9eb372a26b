//! Stock movement, supplier and report endpoints

use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn stock_in<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/stock/in", data).await
    }

    pub async fn stock_out<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/stock/out", data).await
    }

    pub async fn get_stock_history(&self, product_id: i64) -> Result<Value> {
        self.get(&format!("/stock/history/{}", product_id)).await
    }

    pub async fn get_suppliers(&self) -> Result<Value> {
        self.get("/suppliers").await
    }

    pub async fn create_supplier<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/suppliers", data).await
    }

    pub async fn update_supplier<T: Serialize + ?Sized>(&self, id: i64, data: &T) -> Result<Value> {
        self.put(&format!("/suppliers/{}", id), data).await
    }

    pub async fn delete_supplier(&self, id: i64) -> Result<Value> {
        self.delete(&format!("/suppliers/{}", id)).await
    }

    /// Dashboard summary: totals, low stock and near-expiry products
    pub async fn get_summary(&self) -> Result<Value> {
        self.get("/reports/summary").await
    }
}
