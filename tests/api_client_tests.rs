//! REST client tests against an in-process echo backend
//!
//! Run with: cargo test --test api_client_tests

use axum::{
    extract::Path,
    http::{HeaderMap, Method as HttpMethod, StatusCode, Uri},
    routing::any,
    Json, Router,
};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde_json::{json, Value};
use shopfront::api::{ApiClient, ApiClientConfig, Body, FailureKind};
use shopfront::auth::storage::TOKEN_KEY;
use shopfront::auth::{MemoryStorage, Role, SessionStorage, SessionStore, UserData};
use shopfront::error::Error;
use std::sync::Arc;

/// Reflects method, path, auth header, content type and body back as JSON
async fn echo(method: HttpMethod, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "authorization": header("authorization"),
        "contentType": header("content-type"),
        "body": body,
    }))
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::IM_A_TEAPOT);
    (status, Json(json!({ "error": format!("backend said {}", code) })))
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Start the echo backend on a random port and return its API base URL
async fn start_backend() -> String {
    let app = Router::new()
        .route("/api/status/{code}", any(status))
        .route("/api/empty", any(empty))
        .fallback(echo);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}/api", addr)
}

struct Harness {
    storage: Arc<MemoryStorage>,
    store: SessionStore,
    client: ApiClient,
}

async fn harness() -> Harness {
    let base = start_backend().await;
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::open(storage.clone());
    let client = ApiClient::new(ApiClientConfig::new(base), storage.clone()).expect("client");
    Harness {
        storage,
        store,
        client,
    }
}

// ============================================================================
// Credential handling
// ============================================================================

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let h = harness().await;
    let echoed = h.client.get_products().await.unwrap();
    assert_eq!(echoed["path"], "/api/products");
    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn test_login_adds_bearer_token() {
    let mut h = harness().await;
    h.store
        .login("jwt-abc", UserData::new("alice", Some(Role::Customer)))
        .unwrap();

    let echoed = h.client.get_cart().await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer jwt-abc");
}

#[tokio::test]
async fn test_logout_removes_token_from_later_requests() {
    let mut h = harness().await;
    h.store
        .login("jwt-abc", UserData::new("alice", None))
        .unwrap();
    h.store.logout().unwrap();

    let echoed = h.client.get_my_orders().await.unwrap();
    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn test_request_prepared_before_logout_loses_its_header() {
    let mut h = harness().await;
    h.store
        .login("jwt-old", UserData::new("alice", None))
        .unwrap();

    let request = h
        .client
        .prepare(Method::GET, "/orders/customer/me", Body::Empty)
        .unwrap();
    assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer jwt-old");

    h.store.logout().unwrap();
    // the cached request object still holds the stale header
    assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer jwt-old");

    let echoed = h.client.execute(request).await.unwrap();
    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn test_request_prepared_before_relogin_sends_new_token() {
    let mut h = harness().await;
    h.store
        .login("jwt-first", UserData::new("alice", None))
        .unwrap();

    let request = h
        .client
        .prepare(Method::GET, "/cart", Body::Empty)
        .unwrap();

    h.store
        .login("jwt-second", UserData::new("alice", None))
        .unwrap();

    let echoed = h.client.execute(request).await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer jwt-second");
}

#[tokio::test]
async fn test_token_written_out_of_band_is_used() {
    let h = harness().await;
    h.storage.set(TOKEN_KEY, "written-elsewhere").unwrap();

    let echoed = h.client.get_profile().await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer written-elsewhere");
}

#[tokio::test]
async fn test_clients_sharing_storage_follow_the_session() {
    let mut h = harness().await;
    let other = ApiClient::new(ApiClientConfig::new(h.client.base_url()), h.storage.clone())
        .unwrap();

    h.store
        .login("shared", UserData::new("admin", Some(Role::Admin)))
        .unwrap();
    let echoed = other.get_all_users().await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer shared");
}

// ============================================================================
// Content type
// ============================================================================

#[tokio::test]
async fn test_json_is_default_content_type() {
    let h = harness().await;
    let echoed = h.client.get_suppliers().await.unwrap();
    assert_eq!(echoed["contentType"], "application/json");

    let echoed = h.client.add_to_cart(9, None).await.unwrap();
    assert_eq!(echoed["contentType"], "application/json");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"productId": 9, "quantity": 1}));
}

#[tokio::test]
async fn test_multipart_upload_keeps_boundary() {
    let h = harness().await;
    let echoed = h
        .client
        .upload_product_image("milk.png", vec![1, 2, 3])
        .await
        .unwrap();

    assert_eq!(echoed["path"], "/api/products/upload");
    let content_type = echoed["contentType"].as_str().unwrap();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "got {}",
        content_type
    );
    assert!(echoed["body"].as_str().unwrap().contains("filename=\"milk.png\""));
}

// ============================================================================
// Failure classification
// ============================================================================

#[tokio::test]
async fn test_401_is_authentication_failure_and_keeps_credentials() {
    let mut h = harness().await;
    h.store
        .login("expired", UserData::new("alice", None))
        .unwrap();

    let err = h
        .client
        .send(Method::GET, "/status/401", Body::Empty)
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::Authentication));
    assert_eq!(err.status(), Some(401));
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("expired"));
    assert!(h.store.is_authenticated());
}

#[tokio::test]
async fn test_403_is_authorization_failure() {
    let h = harness().await;
    let err = h
        .client
        .send(Method::POST, "/status/403", Body::Empty)
        .await
        .unwrap_err();

    match err {
        Error::Api {
            status,
            kind,
            message,
        } => {
            assert_eq!(status, 403);
            assert_eq!(kind, Some(FailureKind::Authorization));
            assert_eq!(message, "backend said 403");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_5xx_is_server_failure() {
    let h = harness().await;
    for code in ["500", "502", "503"] {
        let err = h
            .client
            .send(Method::GET, &format!("/status/{}", code), Body::Empty)
            .await
            .unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::Server), "status {}", code);
    }
}

#[tokio::test]
async fn test_other_client_errors_are_unclassified() {
    let h = harness().await;
    let err = h
        .client
        .send(Method::GET, "/status/404", Body::Empty)
        .await
        .unwrap_err();
    assert_eq!(err.failure_kind(), None);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    // port 9 (discard) is not served by the test backend
    let client = ApiClient::new(
        ApiClientConfig::new("http://127.0.0.1:9/api"),
        Arc::new(MemoryStorage::new()),
    )
    .unwrap();
    let err = client.get_products().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.failure_kind(), None);
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let h = harness().await;
    let value = h
        .client
        .send(Method::DELETE, "/empty", Body::Empty)
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

// ============================================================================
// Endpoint mapping
// ============================================================================

#[tokio::test]
async fn test_endpoint_paths_and_methods() {
    let h = harness().await;

    let cases: Vec<(Value, &str, &str)> = vec![
        (h.client.get_product(4).await.unwrap(), "GET", "/api/products/4"),
        (h.client.get_order(12).await.unwrap(), "GET", "/api/orders/12"),
        (h.client.get_tracking(12).await.unwrap(), "GET", "/api/orders/12/tracking"),
        (
            h.client.get_location_tracking(12).await.unwrap(),
            "GET",
            "/api/orders/12/location-tracking",
        ),
        (h.client.get_customer_orders(3).await.unwrap(), "GET", "/api/orders/customer/3"),
        (h.client.set_default_address(2).await.unwrap(), "POST", "/api/auth/profile/addresses/2/set-default"),
        (h.client.delete_address(2).await.unwrap(), "DELETE", "/api/auth/profile/addresses/2"),
        (h.client.get_stock_history(8).await.unwrap(), "GET", "/api/stock/history/8"),
        (h.client.delete_supplier(5).await.unwrap(), "DELETE", "/api/suppliers/5"),
        (h.client.get_summary().await.unwrap(), "GET", "/api/reports/summary"),
        (h.client.get_delivery_men().await.unwrap(), "GET", "/api/auth/admin/delivery-men"),
        (h.client.delete_delivery_man(6).await.unwrap(), "DELETE", "/api/auth/admin/delivery-men/6"),
        (h.client.get_available_orders().await.unwrap(), "GET", "/api/delivery/available-orders"),
        (h.client.get_my_delivery_orders().await.unwrap(), "GET", "/api/delivery/my-orders"),
        (h.client.accept_order(7).await.unwrap(), "POST", "/api/delivery/orders/7/accept"),
        (h.client.get_delivery_order_details(7).await.unwrap(), "GET", "/api/delivery/orders/7"),
        (
            h.client.generate_fake_locations(7).await.unwrap(),
            "POST",
            "/api/delivery/orders/7/generate-fake-locations",
        ),
        (h.client.remove_cart_item(1).await.unwrap(), "DELETE", "/api/cart/items/1"),
        (h.client.clear_cart().await.unwrap(), "DELETE", "/api/cart"),
        (h.client.get_product_reviews(4).await.unwrap(), "GET", "/api/reviews/product/4"),
        (h.client.delete_review(11).await.unwrap(), "DELETE", "/api/reviews/11"),
        (h.client.get_my_reviews().await.unwrap(), "GET", "/api/reviews/user/me"),
    ];

    for (echoed, method, path) in cases {
        assert_eq!(echoed["method"], method, "{}", path);
        assert_eq!(echoed["path"], path);
    }
}

#[tokio::test]
async fn test_order_status_payload() {
    let h = harness().await;

    let echoed = h
        .client
        .update_order_status(3, "CANCELLED", Some("out of stock".to_string()))
        .await
        .unwrap();
    assert_eq!(echoed["method"], "PATCH");
    assert_eq!(echoed["path"], "/api/orders/3/status");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"status": "CANCELLED", "cancellationReason": "out of stock"})
    );

    let echoed = h.client.update_order_status(3, "SHIPPED", None).await.unwrap();
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"status": "SHIPPED"}));
}

#[tokio::test]
async fn test_delivery_status_and_location_payloads() {
    let h = harness().await;

    let echoed = h
        .client
        .update_delivery_order_status(5, "DELIVERED")
        .await
        .unwrap();
    assert_eq!(echoed["path"], "/api/delivery/orders/5/update-status");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"status": "DELIVERED"}));

    let location = json!({"latitude": 12.97, "longitude": 77.59});
    let echoed = h.client.update_delivery_location(5, &location).await.unwrap();
    assert_eq!(echoed["path"], "/api/delivery/orders/5/update-location");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, location);
}

#[tokio::test]
async fn test_cart_update_payload() {
    let h = harness().await;
    let echoed = h.client.update_cart_item(2, 4).await.unwrap();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["path"], "/api/cart/items/2");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"quantity": 4}));
}

#[tokio::test]
async fn test_lookup_by_order_number_encodes_segment() {
    let h = harness().await;
    let echoed = h.client.get_order_by_order_number("ORD 42").await.unwrap();
    assert_eq!(echoed["path"], "/api/orders/by-order-number/ORD%2042");

    let echoed = h.client.get_order_by_tracking_id("TRK-9").await.unwrap();
    assert_eq!(echoed["path"], "/api/orders/by-tracking-id/TRK-9");
}

#[tokio::test]
async fn test_login_endpoints_post_credentials() {
    let h = harness().await;
    let creds = json!({"email": "a@b.c", "password": "pw"});

    for (echoed, path) in [
        (h.client.customer_login(&creds).await.unwrap(), "/api/auth/customer/login"),
        (h.client.admin_login(&creds).await.unwrap(), "/api/auth/admin/login"),
        (h.client.google_login(&creds).await.unwrap(), "/api/auth/customer/google"),
        (h.client.send_otp(&creds).await.unwrap(), "/api/auth/customer/send-otp"),
        (h.client.verify_otp(&creds).await.unwrap(), "/api/auth/customer/verify-otp"),
        (h.client.set_password(&creds).await.unwrap(), "/api/auth/customer/set-password"),
        (h.client.change_password(&creds).await.unwrap(), "/api/auth/change-password"),
    ] {
        assert_eq!(echoed["method"], "POST");
        assert_eq!(echoed["path"], path);
    }
}
