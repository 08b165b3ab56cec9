//! Port trait implementation for `BackendClient`.
//!
//! This module implements the core-owned `BackendPort` trait for
//! `BackendClient`, translating HTTP replies into raw core records.

use async_trait::async_trait;
use mcpdesk_core::domain::raw::config_map;
use mcpdesk_core::{
    BackendError, BackendId, BackendPort, BackendResult, ConfigMap, HealthReport, NewIncident,
    PasswordReset, Payload, RawActivity, RawIncident, StatusUpdate,
};
use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::BackendClient;
use crate::error::{HttpClientError, HttpResult};
use crate::http::HttpBackend;
use crate::routes::{CONFIG, HEALTH, RELOAD, Route};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpClientError` to core `BackendError`.
pub(crate) fn map_error(err: HttpClientError) -> BackendError {
    match err {
        HttpClientError::ApiRequestFailed { status, .. } => {
            let message = err.detail();
            BackendError::Http { status, message }
        }
        HttpClientError::InvalidResponse { message } => BackendError::InvalidResponse { message },
        HttpClientError::Network(e) if e.is_decode() => BackendError::InvalidResponse {
            message: e.to_string(),
        },
        HttpClientError::Network(e) => BackendError::Transport {
            message: e.to_string(),
        },
        HttpClientError::UnsupportedBaseUrl { .. } | HttpClientError::InvalidUrl(_) => {
            BackendError::Configuration {
                message: err.to_string(),
            }
        }
        HttpClientError::JsonParse(e) => BackendError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Response Parsing
// ============================================================================

/// Pull the record list out of a list response.
///
/// Backends answer either with a bare array or with the array wrapped under
/// `key`, `result` or `data`.
fn record_list<'a>(value: &'a Value, key: &str) -> HttpResult<&'a Vec<Value>> {
    if let Some(list) = value.as_array() {
        return Ok(list);
    }
    [key, "result", "data"]
        .iter()
        .find_map(|k| value.get(*k).and_then(Value::as_array))
        .ok_or_else(|| HttpClientError::InvalidResponse {
            message: format!("expected a list of {key}"),
        })
}

/// Unwrap a single record that may be nested under `key` or `result`.
fn single_record<'a>(value: &'a Value, key: &str) -> &'a Value {
    [key, "result"]
        .iter()
        .find_map(|k| value.get(*k).filter(|v| v.is_object()))
        .unwrap_or(value)
}

// ============================================================================
// Requests
// ============================================================================

impl<B: HttpBackend> BackendClient<B> {
    async fn call(
        &self,
        method: Method,
        route: Route,
        extra: &[&str],
        body: Option<&Value>,
    ) -> BackendResult<Value> {
        let url = self.endpoint(route, extra).map_err(map_error)?;
        self.backend
            .send_json(method, &url, body)
            .await
            .map_err(map_error)
    }

    fn unsupported(&self, operation: &'static str) -> BackendError {
        BackendError::Unsupported {
            backend: self.id,
            operation,
        }
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> BackendResult<Value> {
    serde_json::to_value(value).map_err(|e| map_error(e.into()))
}

#[async_trait]
impl<B: HttpBackend> BackendPort for BackendClient<B> {
    fn id(&self) -> BackendId {
        self.id
    }

    fn base_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    async fn health(&self) -> BackendResult<HealthReport> {
        let value = self.call(Method::GET, HEALTH, &[], None).await?;
        Ok(HealthReport::from_json(&value))
    }

    async fn list_incidents(&self) -> BackendResult<Vec<RawIncident>> {
        let value = self
            .call(Method::GET, self.routes.incidents, &[], None)
            .await?;
        let records = record_list(&value, "incidents").map_err(map_error)?;
        debug!(backend = %self.id, count = records.len(), "Fetched incidents");
        Ok(records.iter().map(RawIncident::from_json).collect())
    }

    async fn update_incident(
        &self,
        local_id: &str,
        update: &StatusUpdate,
    ) -> BackendResult<RawIncident> {
        let body = to_body(update)?;
        let value = self
            .call(Method::PATCH, self.routes.incidents, &[local_id], Some(&body))
            .await?;
        Ok(RawIncident::from_json(single_record(&value, "incident")))
    }

    async fn list_activities(&self) -> BackendResult<Vec<RawActivity>> {
        let value = self
            .call(Method::GET, self.routes.activities, &[], None)
            .await?;
        let records = record_list(&value, "activities").map_err(map_error)?;
        debug!(backend = %self.id, count = records.len(), "Fetched activities");
        Ok(records.iter().map(RawActivity::from_json).collect())
    }

    async fn get_config(&self) -> BackendResult<ConfigMap> {
        let value = self.call(Method::GET, CONFIG, &[], None).await?;
        value
            .get("config")
            .map(config_map)
            .ok_or_else(|| BackendError::InvalidResponse {
                message: "configuration response has no config object".to_string(),
            })
    }

    async fn put_config(&self, config: &ConfigMap) -> BackendResult<()> {
        let body = json!({ "config": config });
        self.call(Method::PUT, CONFIG, &[], Some(&body)).await?;
        Ok(())
    }

    async fn reload(&self) -> BackendResult<()> {
        self.call(Method::POST, RELOAD, &[], None).await?;
        Ok(())
    }

    async fn reset_password(&self, reset: &PasswordReset) -> BackendResult<Payload> {
        let route = self
            .routes
            .password_reset
            .ok_or_else(|| self.unsupported("password reset"))?;
        let body = to_body(reset)?;
        let value = self.call(Method::POST, route, &[], Some(&body)).await?;
        Ok(Payload::new(value))
    }

    async fn create_incident(&self, incident: &NewIncident) -> BackendResult<Payload> {
        let route = self
            .routes
            .create_incident
            .ok_or_else(|| self.unsupported("incident creation"))?;
        let body = to_body(incident)?;
        let value = self.call(Method::POST, route, &[], Some(&body)).await?;
        Ok(Payload::new(value))
    }
}
