//! Incident command handlers.

use mcpdesk_core::{Decision, Incident, IncidentStatus, Priority, RecordId, cancellable};

use crate::bootstrap::CliContext;
use crate::commands::IncidentCommand;
use crate::error::CliError;
use crate::presentation::{
    format_timestamp, print_coverage_banner, print_separator, truncate_string,
};

/// Execute the incidents (list) command.
pub async fn list(ctx: &CliContext, status: Option<IncidentStatus>) -> Result<(), CliError> {
    let aggregated = cancellable(ctx.cancel_token(), ctx.console().aggregator().list_incidents())
        .await?;
    print_coverage_banner(aggregated.coverage(), &aggregated.failed_backends());

    let incidents: Vec<&Incident> = aggregated
        .items
        .iter()
        .filter(|i| status.is_none_or(|s| i.status == s))
        .collect();

    if incidents.is_empty() {
        println!("No incidents found.");
        return Ok(());
    }

    println!("Found {} incident(s):\n", incidents.len());
    print_incident_table(&incidents);
    Ok(())
}

/// Execute an `incident` subcommand.
pub async fn execute(ctx: &CliContext, command: IncidentCommand) -> Result<(), CliError> {
    match command {
        IncidentCommand::Show { id } => {
            let incident = fetch(ctx, &id).await?;
            print_incident_detail(&incident);
        }
        IncidentCommand::Approve { id, new_password } => {
            let incident = fetch(ctx, &id).await?;
            let actions = ctx.console().actions();
            let updated = match new_password {
                Some(password) => actions.approve_with_password_reset(&incident, &password).await?,
                None => {
                    if let Some(user) = &incident.target_user {
                        println!(
                            "Note: approving without resetting {}'s password (use --new-password).",
                            user.email
                        );
                    }
                    actions.decide(&incident, Decision::Approve).await?
                }
            };
            println!("✓ Incident {} is now {}.", updated.id, updated.status);
        }
        IncidentCommand::Reject { id } => {
            let incident = fetch(ctx, &id).await?;
            let updated = ctx
                .console()
                .actions()
                .decide(&incident, Decision::Reject)
                .await?;
            println!("✓ Incident {} is now {}.", updated.id, updated.status);
        }
    }
    Ok(())
}

async fn fetch(ctx: &CliContext, id: &str) -> Result<Incident, CliError> {
    let id = RecordId::parse(id).map_err(mcpdesk_core::ConsoleError::from)?;
    Ok(cancellable(ctx.cancel_token(), ctx.console().aggregator().get_incident(&id)).await??)
}

const fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "!!",
        Priority::High => "! ",
        Priority::Medium | Priority::Low => "  ",
    }
}

pub(crate) fn print_incident_table(incidents: &[&Incident]) {
    println!(
        "   {:<18} {:<9} {:<9} {:<36} {:<17} Target",
        "ID", "Status", "Priority", "Title", "Updated"
    );
    print_separator(115);

    for incident in incidents {
        let target = incident
            .target_user
            .as_ref()
            .map_or("--", |u| u.email.as_str());
        println!(
            "{} {:<18} {:<9} {:<9} {:<36} {:<17} {}",
            priority_marker(incident.priority),
            truncate_string(&incident.id.to_string(), 18),
            incident.status.as_str(),
            incident.priority.as_str(),
            truncate_string(&incident.title, 35),
            format_timestamp(&incident.updated_at),
            target
        );
    }
}

fn print_incident_detail(incident: &Incident) {
    println!("{}  {}", incident.id, incident.title);
    println!("  Source:   {}", incident.source.display_name());
    println!("  Status:   {}", incident.status);
    println!("  Priority: {}", incident.priority);
    println!("  Created:  {}", format_timestamp(&incident.created_at));
    println!("  Updated:  {}", format_timestamp(&incident.updated_at));
    if let Some(user) = &incident.target_user {
        println!("  Target:   {} <{}>", user.name, user.email);
    }
    if let Some(action) = &incident.action {
        println!("  Action:   {} ({:?})", action.action_type, action.status);
        if let Some(result) = &action.result {
            println!("            {result}");
        }
    }
    println!("\n{}", incident.description);
}
