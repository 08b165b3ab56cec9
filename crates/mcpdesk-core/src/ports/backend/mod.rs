//! Backend integration server port definitions.
//!
//! This module defines the port trait and error type for talking to one
//! backend integration server. The HTTP implementation lives in
//! `mcpdesk-http`; an in-memory implementation lives in [`crate::demo`].

mod client;
mod error;

pub use client::BackendPort;
pub use error::{BackendError, BackendResult};

#[cfg(test)]
pub use client::MockBackendPort;
