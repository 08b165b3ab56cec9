//! HTTP backend abstraction for the backend servers.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest and sends every request exactly once.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::BackendClientConfig;
use crate::error::{HttpClientError, HttpResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON documents.
///
/// This is an implementation detail - external code should use the
/// `BackendPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send a request with an optional JSON body and return the JSON reply.
    ///
    /// An empty reply body yields `Value::Null`. Non-2xx replies are errors.
    async fn send_json(&self, method: Method, url: &Url, body: Option<&Value>) -> HttpResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &BackendClientConfig) -> HttpResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send_json(&self, method: Method, url: &Url, body: Option<&Value>) -> HttpResult<Value> {
        debug!(%method, %url, "Sending backend request");

        let mut request = self
            .client
            .request(method, url.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(HttpClientError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub enum CannedResponse {
        Json(Value),
        Status { status: u16, body: String },
    }

    /// A request the fake backend received.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub body: Option<Value>,
    }

    /// A fake HTTP backend that returns canned responses by method and path.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        responses: Arc<Mutex<HashMap<(Method, String), CannedResponse>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `method path` with a JSON body.
        pub fn with_json(self, method: Method, path: &str, json: Value) -> Self {
            self.with_response(method, path, CannedResponse::Json(json))
        }

        /// Answer `method path` with an error status.
        pub fn with_status(self, method: Method, path: &str, status: u16, body: &str) -> Self {
            self.with_response(
                method,
                path,
                CannedResponse::Status {
                    status,
                    body: body.to_string(),
                },
            )
        }

        fn with_response(self, method: Method, path: &str, response: CannedResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert((method, path.to_string()), response);
            self
        }

        /// Requests received so far, oldest first.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn send_json(
            &self,
            method: Method,
            url: &Url,
            body: Option<&Value>,
        ) -> HttpResult<Value> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method: method.clone(),
                path: url.path().to_string(),
                body: body.cloned(),
            });

            let response = self
                .responses
                .lock()
                .unwrap()
                .get(&(method, url.path().to_string()))
                .cloned();

            match response {
                Some(CannedResponse::Json(json)) => Ok(json),
                Some(CannedResponse::Status { status, body }) => {
                    Err(HttpClientError::ApiRequestFailed {
                        status,
                        url: url.to_string(),
                        body,
                    })
                }
                None => Err(HttpClientError::ApiRequestFailed {
                    status: 404,
                    url: url.to_string(),
                    body: String::new(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = BackendClientConfig::new("http://localhost:3001")
            .with_timeout(std::time::Duration::from_secs(5));
        assert!(ReqwestBackend::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fake_backend_returns_canned_response() {
        let backend = FakeBackend::new().with_json(Method::GET, "/health", json!({"status": "healthy"}));

        let url = Url::parse("http://backend.test/health").unwrap();
        let result = backend.send_json(Method::GET, &url, None).await.unwrap();

        assert_eq!(result["status"], "healthy");
        assert_eq!(backend.requests()[0].path, "/health");
    }

    #[tokio::test]
    async fn test_fake_backend_matches_method() {
        let backend = FakeBackend::new().with_json(Method::GET, "/api/mcp/config", json!({}));

        let url = Url::parse("http://backend.test/api/mcp/config").unwrap();
        let result = backend.send_json(Method::PUT, &url, Some(&json!({}))).await;
        assert!(matches!(
            result,
            Err(HttpClientError::ApiRequestFailed { status: 404, .. })
        ));
    }
}
