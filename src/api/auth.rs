//! Authentication, profile, address and user-administration endpoints

use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn google_login<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/customer/google", data).await
    }

    pub async fn customer_login<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/customer/login", data).await
    }

    pub async fn set_password<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/customer/set-password", data).await
    }

    pub async fn send_otp<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/customer/send-otp", data).await
    }

    pub async fn verify_otp<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/customer/verify-otp", data).await
    }

    pub async fn admin_login<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/admin/login", data).await
    }

    pub async fn get_profile(&self) -> Result<Value> {
        self.get("/auth/profile").await
    }

    pub async fn update_profile<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.put("/auth/profile", data).await
    }

    pub async fn change_password<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/change-password", data).await
    }

    // Addresses

    pub async fn get_addresses(&self) -> Result<Value> {
        self.get("/auth/profile/addresses").await
    }

    pub async fn add_address<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        self.post("/auth/profile/addresses", data).await
    }

    pub async fn update_address<T: Serialize + ?Sized>(&self, id: i64, data: &T) -> Result<Value> {
        self.put(&format!("/auth/profile/addresses/{}", id), data).await
    }

    pub async fn delete_address(&self, id: i64) -> Result<Value> {
        self.delete(&format!("/auth/profile/addresses/{}", id)).await
    }

    pub async fn set_default_address(&self, id: i64) -> Result<Value> {
        self.post_empty(&format!("/auth/profile/addresses/{}/set-default", id))
            .await
    }

    // Administration

    /// Create a courier account; the form may carry proof documents
    pub async fn create_delivery_man(&self, form: Form) -> Result<Value> {
        self.post_multipart("/auth/admin/create-delivery-man", form).await
    }

    pub async fn get_delivery_men(&self) -> Result<Value> {
        self.get("/auth/admin/delivery-men").await
    }

    pub async fn update_delivery_man<T: Serialize + ?Sized>(&self, id: i64, data: &T) -> Result<Value> {
        self.put(&format!("/auth/admin/delivery-men/{}", id), data).await
    }

    pub async fn delete_delivery_man(&self, id: i64) -> Result<Value> {
        self.delete(&format!("/auth/admin/delivery-men/{}", id)).await
    }

    pub async fn get_all_users(&self) -> Result<Value> {
        self.get("/auth/admin/users").await
    }
}
