//! Configuration management subcommands.

use clap::Subcommand;

/// Server configuration commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show a server's current configuration
    Get {
        /// Server id (`m365` or `snow`)
        server: String,
    },
    /// Replace a server's configuration and reload it
    Set {
        /// Server id (`m365` or `snow`)
        server: String,
        /// Entries as KEY=VALUE; the result replaces the whole configuration
        #[arg(required = true, value_parser = parse_key_val)]
        entries: Vec<(String, String)>,
        /// Keep existing keys that are not given on the command line
        #[arg(long)]
        merge: bool,
    },
    /// Ask a server to reload its configuration
    Reload {
        /// Server id (`m365` or `snow`)
        server: String,
    },
}

/// Parse a `KEY=VALUE` argument. The value may itself contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
