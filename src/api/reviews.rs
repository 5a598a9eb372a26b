//! Product review endpoints

use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn get_product_reviews(&self, product_id: i64) -> Result<Value> {
        self.get(&format!("/reviews/product/{}", product_id)).await
    }

    pub async fn add_review<T: Serialize + ?Sized>(&self, product_id: i64, data: &T) -> Result<Value> {
        self.post(&format!("/reviews/product/{}", product_id), data)
            .await
    }

    pub async fn delete_review(&self, review_id: i64) -> Result<Value> {
        self.delete(&format!("/reviews/{}", review_id)).await
    }

    pub async fn get_my_reviews(&self) -> Result<Value> {
        self.get("/reviews/user/me").await
    }
}
