//! HTTP client with response normalization
//!
//! `ApiClient` wraps a `reqwest::Client` and turns every call into either the
//! decoded success body or an [`ApiError`]. Callers never see a raw
//! transport error.

use crate::api::error::ApiError;
use crate::core::config::ApiConfig;
use crate::core::error::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::Instrument;
use uuid::Uuid;

/// Extra headers supplied by a caller for a single request
pub type Headers = HashMap<String, String>;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin JSON client bound to a reassignable base endpoint prefix
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: RwLock<String>,
}

impl ApiClient {
    /// Create a client targeting `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: RwLock::new(base_url.into()),
        })
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.base_url.clone())
    }

    /// Current base endpoint prefix
    pub async fn base_url(&self) -> String {
        self.base_url.read().await.clone()
    }

    /// Reassign the base endpoint prefix.
    ///
    /// Calls already in flight keep the prefix they started with.
    pub async fn set_base_url(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(base_url = %url, "Base URL updated");
        *self.base_url.write().await = url;
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: Option<&Headers>,
    ) -> std::result::Result<T, ApiError> {
        self.request(Method::GET, endpoint, None, headers).await
    }

    pub async fn post<T, B>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        headers: Option<&Headers>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.request(Method::POST, endpoint, body, headers).await
    }

    pub async fn put<T, B>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        headers: Option<&Headers>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.request(Method::PUT, endpoint, body, headers).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: Option<&Headers>,
    ) -> std::result::Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, None, headers).await
    }

    /// Perform a call inside a request span
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
        headers: Option<&Headers>,
    ) -> std::result::Result<T, ApiError> {
        let url = format!("{}{}", self.base_url.read().await, endpoint);
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("api_request", %request_id, %method, %url);

        self.send(method, &url, body, headers).instrument(span).await
    }

    /// Send a single request and normalize its outcome
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        headers: Option<&Headers>,
    ) -> std::result::Result<T, ApiError> {
        let headers = merge_headers(headers)?;

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        tracing::debug!("Sending request");
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request failed before a response was received");
            ApiError::network()
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(status, error = %e, "Failed to read response body");
            ApiError::network()
        })?;

        let payload: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(status, error = %e, "Response body is not valid JSON");
            ApiError::network()
        })?;

        if !(200..300).contains(&status) {
            let error = ApiError::from_response(status, &payload);
            tracing::info!(status, message = %error.message(), "Request rejected by server");
            return Err(error);
        }

        tracing::debug!(status, "Request succeeded");

        serde_json::from_value(payload).map_err(|e| {
            tracing::warn!(status, error = %e, "Unexpected response shape");
            ApiError::unexpected(status)
        })
    }
}

fn encode_body<B: Serialize + ?Sized>(
    body: Option<&B>,
) -> std::result::Result<Option<Vec<u8>>, ApiError> {
    body.map(|b| {
        serde_json::to_vec(b).map_err(|e| {
            tracing::warn!(error = %e, "Failed to encode request body");
            ApiError::network()
        })
    })
    .transpose()
}

/// Merge the default JSON content type with caller headers.
///
/// Caller values replace defaults; header names compare case-insensitively.
fn merge_headers(extra: Option<&Headers>) -> std::result::Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra.into_iter().flatten() {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            tracing::warn!(header = %name, error = %e, "Invalid header name");
            ApiError::network()
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            tracing::warn!(header = name.as_str(), error = %e, "Invalid header value");
            ApiError::network()
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}
