#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultBackendClient is meant to
// be used through the BackendPort trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod routes;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultBackendClient;

// Configuration
pub use config::{BackendClientConfig, default_base_url};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
