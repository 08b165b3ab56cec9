//! Dashboard command handler.

use mcpdesk_core::{Incident, SnapshotSummary, cancellable};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::activity::{newest_first, print_activity_table};
use crate::handlers::incidents::print_incident_table;
use crate::handlers::servers::print_server_table;
use crate::presentation::print_coverage_banner;

const RECENT_ACTIVITY: usize = 5;

/// Execute the dashboard command.
///
/// Fetches servers, incidents and activity in one concurrent refresh.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let snapshot = cancellable(ctx.cancel_token(), ctx.console().aggregator().refresh()).await?;
    let summary = SnapshotSummary::from(&snapshot);

    let mut failed = snapshot.incidents.failed_backends();
    failed.extend(snapshot.activities.failed_backends());
    failed.sort_by_key(|id| id.as_str());
    failed.dedup();
    print_coverage_banner(snapshot.coverage(), &failed);

    println!(
        "Servers online: {}/{}   Open incidents: {}/{}   Activity entries: {}\n",
        summary.servers_online,
        summary.servers_total,
        summary.open_incidents,
        summary.total_incidents,
        summary.activities
    );

    print_server_table(&snapshot.servers);

    let open: Vec<&Incident> = snapshot
        .incidents
        .items
        .iter()
        .filter(|i| i.status.is_actionable())
        .collect();
    println!("\nIncidents awaiting a decision:\n");
    if open.is_empty() {
        println!("  None.");
    } else {
        print_incident_table(&open);
    }

    let recent = newest_first(snapshot.activities.items, Some(RECENT_ACTIVITY));
    if !recent.is_empty() {
        println!("\nRecent activity:\n");
        print_activity_table(&recent);
    }
    Ok(())
}
