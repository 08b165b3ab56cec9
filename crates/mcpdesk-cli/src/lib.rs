//! Command-line operations console for the M365 and ServiceNow MCP servers.
//!
//! The binary in `main.rs` parses arguments, bootstraps a [`CliContext`] and
//! dispatches to [`handlers`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Dependencies used only by the binary
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, ConsoleConfig, DataSource, bootstrap, bootstrap_with};
pub use commands::{Commands, IncidentCommand};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
