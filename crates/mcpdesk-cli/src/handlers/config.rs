//! Config command handler.
//!
//! Reads and writes a single server's configuration map.

use mcpdesk_core::{ConfigMap, ConsoleError};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Execute the config command.
pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<(), CliError> {
    let gateway = ctx.console().config();
    match command {
        ConfigCommand::Get { server } => {
            let config = gateway.get_config(&server).await?;
            print_config(&server, &config);
        }
        ConfigCommand::Set {
            server,
            entries,
            merge,
        } => {
            let mut config = if merge {
                gateway.get_config(&server).await?
            } else {
                ConfigMap::new()
            };
            config.extend(entries);

            match gateway.update_config(&server, &config).await {
                Ok(updated) => {
                    println!("✓ Configuration saved and reloaded on {}.", updated.name);
                    if !updated.status.is_online() {
                        println!("  The server did not report healthy after reloading.");
                    }
                }
                Err(err @ ConsoleError::ReloadFailed { .. }) => {
                    eprintln!("Configuration was saved, but {server} has not reloaded it.");
                    eprintln!("Run `mcpdesk config reload {server}` to retry.");
                    return Err(err.into());
                }
                Err(err) => return Err(err.into()),
            }
        }
        ConfigCommand::Reload { server } => {
            gateway.reload(&server).await?;
            println!("✓ Reloaded {server}.");
        }
    }
    Ok(())
}

fn print_config(server: &str, config: &ConfigMap) {
    if config.is_empty() {
        println!("{server} has no configuration entries.");
        return;
    }
    let width = config.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in config {
        println!("{key:<width$} = {value}");
    }
}
