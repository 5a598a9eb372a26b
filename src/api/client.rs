//! REST client core
//!
//! Every request reads the credential from session storage at send time, so
//! a login or logout performed elsewhere takes effect on the next request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::failure::{failure_message, FailureKind};
use crate::auth::storage::{SessionStorage, ROLE_KEY, TOKEN_KEY};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API, e.g. `http://localhost:8080/api`
    pub base_url: String,
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        ApiConfig::default().into()
    }
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

impl From<ApiConfig> for ApiClientConfig {
    fn from(config: ApiConfig) -> Self {
        Self {
            base_url: config.base_url,
            user_agent: config.user_agent,
            headers: config.headers,
        }
    }
}

/// Request payload
pub enum Body {
    Empty,
    Json(Value),
    /// Content type (with boundary) is set by the transport
    Multipart(reqwest::multipart::Form),
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(payload)?))
    }
}

/// Client for the storefront backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiClientConfig,
    storage: Arc<dyn SessionStorage>,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let http = create_http_client(&config)?;

        tracing::info!("API base URL: {}", config.base_url);

        Ok(Self {
            http,
            config,
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn storage(&self) -> Arc<dyn SessionStorage> {
        Arc::clone(&self.storage)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Attach the stored credential and default content type to an outbound request.
    ///
    /// Any Authorization header already on the request is replaced or removed,
    /// so a request built under an earlier session never leaks its credential.
    pub fn apply_session(&self, request: &mut Request) {
        let method = request.method().clone();
        let url = request.url().to_string();
        let headers = request.headers_mut();

        match self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) {
            Some(token) => match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                    tracing::debug!("Adding token to {} {}", method, url);
                }
                Err(e) => {
                    tracing::warn!("Stored token is not a valid header value: {}", e);
                    headers.remove(AUTHORIZATION);
                }
            },
            None => {
                tracing::debug!("No token found for {} {}", method, url);
                headers.remove(AUTHORIZATION);
            }
        }

        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
    }

    /// Build a request for `path` with the session applied
    pub fn prepare(&self, method: Method, path: &str, body: Body) -> Result<Request> {
        let builder = self.http.request(method, self.url(path));
        let builder = match body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(form),
        };

        let mut request = builder.build()?;
        self.apply_session(&mut request);
        Ok(request)
    }

    /// Send a request and decode its JSON body.
    ///
    /// The session is re-applied here, so a request prepared before a login
    /// or logout carries whatever credential storage holds at send time.
    pub async fn execute(&self, mut request: Request) -> Result<Value> {
        self.apply_session(&mut request);
        let url = request.url().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            Error::Http(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(self.failure(status, &body, &url));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned())))
    }

    fn failure(&self, status: reqwest::StatusCode, body: &[u8], url: &str) -> Error {
        let kind = FailureKind::classify(status);
        let message = failure_message(status, body);
        let token_present = self.storage.get(TOKEN_KEY).is_some();

        match kind {
            Some(FailureKind::Authentication) => tracing::error!(
                "401 Unauthorized: url={}, message={}, token_present={}",
                url,
                message,
                token_present
            ),
            Some(FailureKind::Authorization) => tracing::error!(
                "403 Forbidden: url={}, message={}, role={}",
                url,
                message,
                self.storage
                    .get(ROLE_KEY)
                    .unwrap_or_else(|| "unknown".to_string())
            ),
            Some(FailureKind::Server) => {
                tracing::error!("Server error: url={}, status={}, message={}", url, status, message)
            }
            None => tracing::debug!(
                "Request failed: url={}, status={}, message={}",
                url,
                status,
                message
            ),
        }

        Error::Api {
            status: status.as_u16(),
            kind,
            message,
        }
    }

    pub async fn send(&self, method: Method, path: &str, body: Body) -> Result<Value> {
        let request = self.prepare(method, path, body)?;
        self.execute(request).await
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, Body::Empty).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, Body::Empty).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<Value> {
        self.send(Method::POST, path, Body::Empty).await
    }

    pub(crate) async fn post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value> {
        self.send(Method::POST, path, Body::json(payload)?).await
    }

    pub(crate) async fn put<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value> {
        self.send(Method::PUT, path, Body::json(payload)?).await
    }

    pub(crate) async fn patch<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value> {
        self.send(Method::PATCH, path, Body::json(payload)?).await
    }

    pub(crate) async fn post_multipart(&self, path: &str, form: reqwest::multipart::Form) -> Result<Value> {
        self.send(Method::POST, path, Body::Multipart(form)).await
    }
}

/// Build the HTTP client with the user agent and configured extra headers
fn create_http_client(config: &ApiClientConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Config(format!("Invalid user agent: {}", e)))?,
    );

    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::Config(format!("Invalid header name '{}': {}", key, e)))?;

        if name == AUTHORIZATION {
            tracing::warn!("Ignoring configured Authorization header; the session token is used instead");
            continue;
        }

        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("Invalid header value for '{}': {}", key, e)))?;
        headers.insert(name, value);
    }

    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}

/// Encode a free-form path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
