//! Activity command handler.

use mcpdesk_core::{Activity, cancellable};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_timestamp, print_coverage_banner, print_separator, truncate_string};

/// Execute the activity command.
///
/// Entries from both backends are shown newest first.
pub async fn execute(ctx: &CliContext, limit: Option<usize>) -> Result<(), CliError> {
    let aggregated = cancellable(ctx.cancel_token(), ctx.console().aggregator().list_activities())
        .await?;
    print_coverage_banner(aggregated.coverage(), &aggregated.failed_backends());

    let activities = newest_first(aggregated.into_items(), limit);
    if activities.is_empty() {
        println!("No activity recorded.");
        return Ok(());
    }

    print_activity_table(&activities);
    Ok(())
}

/// Sort newest first and keep at most `limit` entries.
pub(crate) fn newest_first(mut activities: Vec<Activity>, limit: Option<usize>) -> Vec<Activity> {
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(limit) = limit {
        activities.truncate(limit);
    }
    activities
}

pub(crate) fn print_activity_table(activities: &[Activity]) {
    println!(
        "{:<17} {:<20} {:<6} {:<8} {:<8} Details",
        "Time", "Type", "Source", "Target", "Status"
    );
    print_separator(100);

    for activity in activities {
        let details = activity
            .error
            .clone()
            .unwrap_or_else(|| activity.payload.to_string());
        println!(
            "{:<17} {:<20} {:<6} {:<8} {:<8} {}",
            format_timestamp(&activity.timestamp),
            truncate_string(activity.kind.as_str(), 19),
            activity.source,
            truncate_string(&activity.target, 7),
            activity.status.as_str(),
            truncate_string(&details, 40)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mcpdesk_core::{ActivityKind, ActivityStatus, BackendId, Payload, RecordId};

    fn activity(local_id: &str, minutes_ago: i64) -> Activity {
        Activity {
            id: RecordId::new(BackendId::M365, local_id),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            kind: ActivityKind::Request,
            source: BackendId::M365,
            target: "client".to_string(),
            payload: Payload::empty(),
            status: ActivityStatus::Success,
            error: None,
        }
    }

    #[test]
    fn test_newest_first_with_limit() {
        let sorted = newest_first(
            vec![activity("old", 30), activity("new", 1), activity("mid", 10)],
            Some(2),
        );
        let ids: Vec<&str> = sorted.iter().map(|a| a.id.local_id()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }
}
