//! Servers command handler.

use mcpdesk_core::{McpServer, cancellable};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, format_timestamp, print_separator, truncate_string};

/// Execute the servers command.
///
/// Without an id, probes both backends and lists them; with one, shows that
/// server in detail including its configuration snapshot.
pub async fn execute(ctx: &CliContext, id: Option<&str>) -> Result<(), CliError> {
    let aggregator = ctx.console().aggregator();
    match id {
        Some(id) => {
            let server = cancellable(ctx.cancel_token(), aggregator.get_server(id)).await??;
            print_server_detail(&server);
        }
        None => {
            let servers = cancellable(ctx.cancel_token(), aggregator.list_servers()).await?;
            print_server_table(&servers);
        }
    }
    Ok(())
}

pub(crate) fn print_server_table(servers: &[McpServer]) {
    println!(
        "{:<6} {:<22} {:<8} {:<26} {:<17} Capabilities",
        "ID", "Name", "Status", "URL", "Last seen"
    );
    print_separator(110);

    for server in servers {
        let last_seen = server.last_seen.as_ref().map(format_timestamp);
        let capabilities: Vec<&str> = server.capabilities.iter().map(|c| c.as_str()).collect();
        println!(
            "{:<6} {:<22} {:<8} {:<26} {:<17} {}",
            server.id,
            truncate_string(&server.name, 21),
            server.status.as_str(),
            truncate_string(&server.url, 25),
            format_optional(last_seen.as_ref(), "--"),
            capabilities.join(", ")
        );
    }
}

fn print_server_detail(server: &McpServer) {
    println!("{} ({})", server.name, server.id);
    println!("  {}", server.description);
    println!("  URL:       {}", server.url);
    println!("  Status:    {}", server.status.as_str());
    if let Some(last_seen) = &server.last_seen {
        println!("  Last seen: {}", format_timestamp(last_seen));
    }

    if server.config.is_empty() {
        return;
    }
    println!("\n  Configuration:");
    for (key, value) in &server.config {
        println!("    {key} = {value}");
    }
}
