//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::bootstrap::DataSource;
use crate::commands::Commands;

/// Command-line interface for the mcpdesk operations console.
///
/// Global options select the backends; subcommands act on them.
#[derive(Parser)]
#[command(name = "mcpdesk")]
#[command(about = "Review and act on incidents from the M365 and ServiceNow MCP servers")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Microsoft 365 server
    #[arg(long = "m365-url", env = "MCPDESK_M365_URL", global = true)]
    pub m365_url: Option<String>,

    /// Base URL of the ServiceNow server
    #[arg(long = "snow-url", env = "MCPDESK_SNOW_URL", global = true)]
    pub snow_url: Option<String>,

    /// Where records come from
    #[arg(
        long = "data-source",
        env = "MCPDESK_DATA_SOURCE",
        value_enum,
        default_value_t = DataSource::Live,
        global = true
    )]
    pub data_source: DataSource,

    /// Shorthand for `--data-source demo`
    #[arg(long, global = true)]
    pub demo: bool,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Data source after applying `--demo`.
    pub const fn effective_data_source(&self) -> DataSource {
        if self.demo { DataSource::Demo } else { self.data_source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "mcpdesk",
            "--verbose",
            "--m365-url",
            "http://m365.internal:3001",
            "servers",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.m365_url.as_deref(), Some("http://m365.internal:3001"));
    }

    #[test]
    fn test_demo_flag_overrides_data_source() {
        let cli = Cli::parse_from(["mcpdesk", "dashboard", "--demo"]);
        assert_eq!(cli.effective_data_source(), DataSource::Demo);
    }
}
