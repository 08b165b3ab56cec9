//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They never see a
//! concrete backend implementation.

mod actions;
mod aggregated;
mod aggregator;
mod cancel;
mod config_gateway;
mod console;
mod error;
pub mod health;

pub use actions::{OperatorActions, PASSWORD_RESET_ACTION};
pub use aggregated::{Aggregated, BackendFailure, Coverage};
pub use aggregator::{Aggregator, Snapshot, SnapshotSummary};
pub use cancel::cancellable;
pub use config_gateway::ConfigGateway;
pub use console::Console;
pub use error::ConsoleError;
