//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. Backend ports are instantiated here, either as HTTP
//! clients (via mcpdesk-http) or as in-memory demo backends, and handed to
//! the core `Console`.
//!
//! Command handlers receive the fully-composed context and delegate work to it.

use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use mcpdesk_core::demo::DemoBackend;
use mcpdesk_core::{BackendId, BackendPort, Backends, Console};
use mcpdesk_http::{BackendClientConfig, DefaultBackendClient, default_base_url};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Where the console gets its records from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    /// The real backend servers over HTTP
    #[default]
    Live,
    /// Seeded in-memory backends
    Demo,
}

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the Microsoft 365 server.
    pub m365_url: String,
    /// Base URL of the ServiceNow server.
    pub snow_url: String,
    pub data_source: DataSource,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            m365_url: default_base_url(BackendId::M365).to_string(),
            snow_url: default_base_url(BackendId::ServiceNow).to_string(),
            data_source: DataSource::Live,
            timeout: None,
        }
    }
}

impl ConsoleConfig {
    /// Resolve the configuration from parsed arguments.
    ///
    /// Flags and their environment variables win over the defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = Self::default();
        Self {
            m365_url: cli.m365_url.clone().unwrap_or(defaults.m365_url),
            snow_url: cli.snow_url.clone().unwrap_or(defaults.snow_url),
            data_source: cli.effective_data_source(),
            timeout: cli.timeout.map(Duration::from_secs),
        }
    }

    fn url(&self, id: BackendId) -> &str {
        match id {
            BackendId::M365 => &self.m365_url,
            BackendId::ServiceNow => &self.snow_url,
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub console: Console,
    /// Cancelled on Ctrl-C; in-flight aggregate fetches stop when it fires.
    pub cancel: CancellationToken,
    pub data_source: DataSource,
}

impl CliContext {
    /// Access the console.
    pub const fn console(&self) -> &Console {
        &self.console
    }

    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

fn http_backend(config: &ConsoleConfig, id: BackendId) -> Result<Arc<dyn BackendPort>, CliError> {
    let client_config =
        BackendClientConfig::new(config.url(id)).with_optional_timeout(config.timeout);
    let client = DefaultBackendClient::new(id, &client_config)
        .map_err(|e| CliError::Config(format!("{}: {e}", id.display_name())))?;
    Ok(Arc::new(client))
}

/// Bootstrap the CLI application.
///
/// Builds one port per backend for the configured data source and assembles
/// the `Console` over them.
pub fn bootstrap(config: &ConsoleConfig) -> Result<CliContext, CliError> {
    let backends = match config.data_source {
        DataSource::Live => Backends::new(
            http_backend(config, BackendId::M365)?,
            http_backend(config, BackendId::ServiceNow)?,
        ),
        DataSource::Demo => Backends::new(
            Arc::new(DemoBackend::m365()),
            Arc::new(DemoBackend::servicenow()),
        ),
    };
    debug!(data_source = ?config.data_source, ?backends, "Console bootstrapped");
    Ok(bootstrap_with(backends, config.data_source))
}

/// Bootstrap with custom backends (for testing).
pub fn bootstrap_with(backends: Backends, data_source: DataSource) -> CliContext {
    CliContext {
        console: Console::new(backends),
        cancel: CancellationToken::new(),
        data_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.m365_url, "http://localhost:3001");
        assert_eq!(config.snow_url, "http://localhost:3002");
        assert_eq!(config.data_source, DataSource::Live);
    }

    #[test]
    fn test_live_bootstrap_rejects_bad_url() {
        let config = ConsoleConfig {
            snow_url: "not a url".to_string(),
            ..ConsoleConfig::default()
        };
        let err = bootstrap(&config).err().unwrap();
        assert_eq!(err.exit_code(), 78);
    }

    #[tokio::test]
    async fn test_demo_bootstrap_lists_both_servers() {
        let config = ConsoleConfig {
            data_source: DataSource::Demo,
            ..ConsoleConfig::default()
        };
        let ctx = bootstrap(&config).unwrap();
        let servers = ctx.console().aggregator().list_servers().await;
        assert_eq!(servers.len(), 2);
        assert!(servers.iter().all(|s| s.status.is_online()));
    }
}
