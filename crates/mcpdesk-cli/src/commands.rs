//! Main commands enum and primary subcommands.

use clap::Subcommand;
use mcpdesk_core::IncidentStatus;

use crate::config_commands::ConfigCommand;

/// Available commands for the operations console.
#[derive(Subcommand)]
pub enum Commands {
    /// List backend servers, or show one in detail
    Servers {
        /// Server id (`m365` or `snow`)
        id: Option<String>,
    },

    /// List incidents from both backends
    Incidents {
        /// Only show incidents with this status (new, pending, resolved, rejected)
        #[arg(short, long)]
        status: Option<IncidentStatus>,
    },

    /// Inspect or decide on a single incident
    Incident {
        #[command(subcommand)]
        command: IncidentCommand,
    },

    /// Show recent activity from both backends
    Activity {
        /// Show at most this many entries, newest first
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Read or change a server's configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Reset a user's password through the M365 server
    ResetPassword {
        /// The user's email address
        #[arg(long)]
        email: String,
        /// The new password; the user must change it at next sign-in
        #[arg(long)]
        password: String,
    },

    /// Open a new incident on the ServiceNow server
    CreateIncident {
        /// Short description
        #[arg(long)]
        title: String,
        /// Full description
        #[arg(long)]
        description: String,
        /// ServiceNow priority (1 = critical .. 4 = low)
        #[arg(long, default_value = "3")]
        priority: String,
        /// ServiceNow category
        #[arg(long, default_value = "inquiry")]
        category: String,
    },

    /// Summary of servers, incidents and activity
    Dashboard,
}

/// Single-incident command variants.
#[derive(Subcommand)]
pub enum IncidentCommand {
    /// Show one incident
    Show {
        /// Incident id, e.g. `snow-INC0010001`
        id: String,
    },
    /// Approve (resolve) an incident
    Approve {
        /// Incident id
        id: String,
        /// Reset the target user's password to this value before resolving
        #[arg(long)]
        new_password: Option<String>,
    },
    /// Reject an incident
    Reject {
        /// Incident id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_incidents_status_filter_parses() {
        let cli = Cli::parse_from(["mcpdesk", "incidents", "--status", "in progress"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Incidents {
                status: Some(IncidentStatus::Pending)
            })
        ));
    }

    #[test]
    fn test_approve_with_password() {
        let cli = Cli::parse_from([
            "mcpdesk",
            "incident",
            "approve",
            "m365-7",
            "--new-password",
            "s3cret!",
        ]);
        let Some(Commands::Incident {
            command: IncidentCommand::Approve { id, new_password },
        }) = cli.command
        else {
            panic!("expected incident approve");
        };
        assert_eq!(id, "m365-7");
        assert_eq!(new_password.as_deref(), Some("s3cret!"));
    }

    #[test]
    fn test_create_incident_defaults() {
        let cli = Cli::parse_from([
            "mcpdesk",
            "create-incident",
            "--title",
            "VPN down",
            "--description",
            "Remote staff cannot connect",
        ]);
        let Some(Commands::CreateIncident {
            priority, category, ..
        }) = cli.command
        else {
            panic!("expected create-incident");
        };
        assert_eq!(priority, "3");
        assert_eq!(category, "inquiry");
    }
}
