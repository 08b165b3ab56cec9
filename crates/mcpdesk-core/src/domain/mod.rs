//! Core domain types.
//!
//! These types represent the unified console model, independent of any
//! transport concerns.
//!
//! # Structure
//!
//! - `backend` - Backend identity and capability tags
//! - `record_id` - Source-qualified record ids
//! - `server` - Backend server status (`McpServer`)
//! - `incident` - Incidents and the requests that act on them
//! - `activity` - Audit log entries
//! - `raw` - Loosely-typed backend records prior to normalization

mod activity;
mod backend;
mod incident;
mod payload;
pub mod raw;
mod record_id;
mod server;

pub use activity::{Activity, ActivityKind, ActivityStatus};
pub use backend::{BackendId, Capability};
pub use incident::{
    ActionRequest, ActionStatus, Decision, Incident, IncidentAction, IncidentStatus, NewIncident,
    PasswordReset, Priority, StatusUpdate, TargetUser,
};
pub use payload::Payload;
pub use raw::{HealthReport, RawActivity, RawIncident};
pub use record_id::{RecordId, RecordIdError};
pub use server::{ConfigMap, McpServer, ServerStatus};
