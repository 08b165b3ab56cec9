//! Command handlers that delegate to the core `Console`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call console services
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Talk to backends directly
//! - Contain business logic

pub mod actions;
pub mod activity;
pub mod config;
pub mod dashboard;
pub mod incidents;
pub mod servers;
