//! Handlers for operator actions that are not tied to an existing incident.

use mcpdesk_core::NewIncident;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the reset-password command.
pub async fn reset_password(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let result = ctx
        .console()
        .actions()
        .reset_password(email, password)
        .await?;
    println!("✓ Password reset for {email}. The user must change it at next sign-in.");
    if let Some(message) = result.as_value().get("message").and_then(|m| m.as_str()) {
        println!("  {message}");
    }
    Ok(())
}

/// Execute the create-incident command.
pub async fn create_incident(ctx: &CliContext, incident: NewIncident) -> Result<(), CliError> {
    let result = ctx.console().actions().create_incident(&incident).await?;
    let value = result.as_value();
    let number = ["incidentId", "number", "sys_id", "id"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()));
    match number {
        Some(number) => println!("✓ Created ServiceNow incident {number}."),
        None => println!("✓ Created ServiceNow incident."),
    }
    Ok(())
}
