//! Product catalogue endpoints

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn get_products(&self) -> Result<Value> {
        self.get("/products").await
    }

    pub async fn get_product(&self, id: i64) -> Result<Value> {
        self.get(&format!("/products/{}", id)).await
    }

    /// Upload a product image as the multipart field `file`
    pub async fn upload_product_image(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.into()));
        self.post_multipart("/products/upload", form).await
    }
}
