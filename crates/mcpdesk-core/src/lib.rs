//! Core of the mcpdesk operations console.
//!
//! Holds the unified domain model, the [`BackendPort`] each backend server is
//! reached through, and the services that aggregate and act on them. Nothing
//! here knows about HTTP; adapters live in `mcpdesk-http` and `mcpdesk-cli`.

#![deny(unused_crate_dependencies)]

pub mod demo;
pub mod domain;
pub mod normalize;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ActionRequest, ActionStatus, Activity, ActivityKind, ActivityStatus, BackendId, Capability,
    ConfigMap, Decision, HealthReport, Incident, IncidentAction, IncidentStatus, McpServer,
    NewIncident, PasswordReset, Payload, Priority, RawActivity, RawIncident, RecordId,
    RecordIdError, ServerStatus, StatusUpdate, TargetUser,
};
pub use ports::{BackendError, BackendPort, BackendResult, Backends};
pub use services::{
    Aggregated, Aggregator, BackendFailure, ConfigGateway, Console, ConsoleError, Coverage,
    OperatorActions, Snapshot, SnapshotSummary, cancellable,
};

#[cfg(test)]
use tokio_test as _;
