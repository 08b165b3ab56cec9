//! Backend port trait.

use super::error::BackendResult;
use crate::domain::{
    BackendId, ConfigMap, HealthReport, NewIncident, PasswordReset, Payload, RawActivity,
    RawIncident, StatusUpdate,
};
use async_trait::async_trait;

/// Port trait for one backend integration server.
///
/// This trait defines the interface the aggregation services use to reach a
/// backend. One instance is bound to exactly one backend.
///
/// # Design
///
/// - Returns raw, loosely-typed records; normalization happens in core
/// - Returns `BackendError` for all failures, never retries
/// - Operations a backend does not offer fail with `BackendError::Unsupported`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendPort: Send + Sync {
    /// Which backend this port talks to.
    fn id(&self) -> BackendId;

    /// Base URL the port is bound to, for display.
    fn base_url(&self) -> String;

    /// Query the liveness endpoint.
    async fn health(&self) -> BackendResult<HealthReport>;

    /// List raw incidents in backend order.
    async fn list_incidents(&self) -> BackendResult<Vec<RawIncident>>;

    /// Apply a status update to the incident with the given backend-local id.
    ///
    /// Returns the backend's view of the incident after the update, which may
    /// be partial.
    async fn update_incident(
        &self,
        local_id: &str,
        update: &StatusUpdate,
    ) -> BackendResult<RawIncident>;

    /// List raw activity records in backend order.
    async fn list_activities(&self) -> BackendResult<Vec<RawActivity>>;

    /// Read the backend's configuration map.
    async fn get_config(&self) -> BackendResult<ConfigMap>;

    /// Persist a new configuration map.
    async fn put_config(&self, config: &ConfigMap) -> BackendResult<()>;

    /// Ask the backend to reload its configuration.
    async fn reload(&self) -> BackendResult<()>;

    /// Reset a user's password (M365 only).
    async fn reset_password(&self, request: &PasswordReset) -> BackendResult<Payload>;

    /// Open a new incident (ServiceNow only).
    async fn create_incident(&self, incident: &NewIncident) -> BackendResult<Payload>;
}
