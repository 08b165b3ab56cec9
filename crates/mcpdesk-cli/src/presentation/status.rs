//! Status lines shared by the listing commands.

use chrono::{DateTime, Local, Utc};
use mcpdesk_core::{BackendId, Coverage};

/// Banner describing missing data, or `None` when everything arrived.
pub fn coverage_banner(coverage: Coverage, failed: &[BackendId]) -> Option<String> {
    let names: Vec<&str> = failed.iter().map(|id| id.display_name()).collect();
    match coverage {
        Coverage::Complete => None,
        Coverage::Partial => Some(format!(
            "! Some data is missing: {} did not respond.",
            names.join(", ")
        )),
        Coverage::Unavailable => {
            Some("! No data available: no backend server responded.".to_string())
        }
    }
}

/// Print the coverage banner to stderr, if there is one.
pub fn print_coverage_banner(coverage: Coverage, failed: &[BackendId]) {
    if let Some(banner) = coverage_banner(coverage, failed) {
        eprintln!("{banner}\n");
    }
}

/// Render a timestamp in local time for tables.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_has_no_banner() {
        assert!(coverage_banner(Coverage::Complete, &[]).is_none());
    }

    #[test]
    fn test_partial_names_failed_backend() {
        let banner = coverage_banner(Coverage::Partial, &[BackendId::ServiceNow]).unwrap();
        assert!(banner.contains("ServiceNow Server"));
        assert!(banner.contains("missing"));
    }

    #[test]
    fn test_unavailable_differs_from_partial() {
        let all = coverage_banner(Coverage::Unavailable, &BackendId::ALL).unwrap();
        let some = coverage_banner(Coverage::Partial, &[BackendId::M365]).unwrap();
        assert_ne!(all, some);
        assert!(all.contains("No data"));
    }
}
