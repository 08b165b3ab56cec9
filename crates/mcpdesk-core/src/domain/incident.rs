//! Incident domain types.
//!
//! Incidents are units of work awaiting operator attention. Each backend has
//! its own vocabulary for status and priority; the enums here are the closed
//! sets the console works with, and the `from_backend` constructors map the
//! backend variants into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BackendId, Payload, RecordId};

/// Lifecycle state of an incident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    New,
    Pending,
    Resolved,
    Rejected,
}

impl IncidentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }

    /// Map a backend-specific status string into the closed set.
    ///
    /// ServiceNow's table API reports `state` as a numeric code, optionally
    /// with a label such as `"6 - Resolved"`. Returns `None` for values no
    /// backend is known to emit.
    pub fn from_backend(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            let code = trimmed
                .split(|c: char| !c.is_ascii_digit())
                .next()
                .unwrap_or("");
            return match code {
                "1" => Some(Self::New),
                "2" | "3" => Some(Self::Pending),
                "6" | "7" => Some(Self::Resolved),
                "8" => Some(Self::Rejected),
                _ => None,
            };
        }
        match trimmed.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "new" | "open" | "opened" => Some(Self::New),
            "pending" | "in_progress" | "on_hold" | "awaiting_approval" | "assigned" => {
                Some(Self::Pending)
            }
            "resolved" | "closed" | "completed" | "done" => Some(Self::Resolved),
            "rejected" | "cancelled" | "canceled" | "denied" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether the incident still needs an operator decision.
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::New | Self::Pending)
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for IncidentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_backend(s).ok_or_else(|| format!("unknown incident status: {s}"))
    }
}

/// Urgency of an incident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Map a backend priority into the closed set.
    ///
    /// ServiceNow reports numeric priorities (`1` is most urgent), optionally
    /// with a label such as `"2 - High"`.
    pub fn from_backend(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let head = normalized
            .split(|c: char| c == '-' || c.is_whitespace())
            .find(|part| !part.is_empty())
            .unwrap_or("");
        match head {
            "1" | "critical" | "urgent" => Some(Self::Critical),
            "2" | "high" => Some(Self::High),
            "3" | "medium" | "moderate" | "normal" => Some(Self::Medium),
            "4" | "5" | "low" | "planning" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_backend(s).ok_or_else(|| format!("unknown priority: {s}"))
    }
}

/// Person an incident is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetUser {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Progress of the remediation action attached to an incident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl ActionStatus {
    pub fn from_backend(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "in_progress" | "queued" => Some(Self::Pending),
            "completed" | "success" | "succeeded" | "done" => Some(Self::Completed),
            "failed" | "error" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Remediation action recorded on an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Payload>,
}

/// A unit of work requiring operator attention, in unified shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: RecordId,
    pub source: BackendId,
    pub title: String,
    pub description: String,
    pub status: IncidentStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user: Option<TargetUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<IncidentAction>,
}

/// Action submitted alongside a status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub action_type: String,
    pub payload: Payload,
}

impl ActionRequest {
    pub fn new(action_type: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: payload.into(),
        }
    }
}

/// Body of an incident status update sent to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: IncidentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRequest>,
}

impl StatusUpdate {
    pub const fn new(status: IncidentStatus) -> Self {
        Self {
            status,
            action: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionRequest) -> Self {
        self.action = Some(action);
        self
    }
}

/// Operator decision on a pending incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status an incident ends up in after the decision.
    pub const fn resulting_status(self) -> IncidentStatus {
        match self {
            Self::Approve => IncidentStatus::Resolved,
            Self::Reject => IncidentStatus::Rejected,
        }
    }
}

/// Request to open a new incident on the ServiceNow backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
}

/// Request to reset a user's password through the M365 backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub user_email: String,
    pub new_password: String,
    pub force_change: bool,
}

impl PasswordReset {
    /// Reset that forces the user to pick a new password at next sign-in.
    pub fn forced(user_email: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            new_password: new_password.into(),
            force_change: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_backend_variants() {
        assert_eq!(IncidentStatus::from_backend("open"), Some(IncidentStatus::New));
        assert_eq!(
            IncidentStatus::from_backend("In Progress"),
            Some(IncidentStatus::Pending)
        );
        assert_eq!(
            IncidentStatus::from_backend("closed"),
            Some(IncidentStatus::Resolved)
        );
        assert_eq!(
            IncidentStatus::from_backend("cancelled"),
            Some(IncidentStatus::Rejected)
        );
        assert_eq!(IncidentStatus::from_backend("weird"), None);
    }

    #[test]
    fn test_status_maps_servicenow_state_codes() {
        assert_eq!(IncidentStatus::from_backend("1"), Some(IncidentStatus::New));
        assert_eq!(IncidentStatus::from_backend("2"), Some(IncidentStatus::Pending));
        assert_eq!(IncidentStatus::from_backend("3 - On Hold"), Some(IncidentStatus::Pending));
        assert_eq!(IncidentStatus::from_backend("6"), Some(IncidentStatus::Resolved));
        assert_eq!(IncidentStatus::from_backend("7 - Closed"), Some(IncidentStatus::Resolved));
        assert_eq!(IncidentStatus::from_backend("8"), Some(IncidentStatus::Rejected));
        assert_eq!(IncidentStatus::from_backend("42"), None);
    }

    #[test]
    fn test_priority_maps_servicenow_numbers() {
        assert_eq!(Priority::from_backend("1"), Some(Priority::Critical));
        assert_eq!(Priority::from_backend("2 - High"), Some(Priority::High));
        assert_eq!(Priority::from_backend("3"), Some(Priority::Medium));
        assert_eq!(Priority::from_backend("5 - Planning"), Some(Priority::Low));
        assert_eq!(Priority::from_backend("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_backend(""), None);
    }

    #[test]
    fn test_status_display_honors_width() {
        assert_eq!(format!("[{:<9}]", IncidentStatus::New), "[new      ]");
        assert_eq!(format!("[{:>6}]", Priority::High), "[  high]");
    }

    #[test]
    fn test_status_update_body_shape() {
        let update = StatusUpdate::new(IncidentStatus::Resolved).with_action(ActionRequest::new(
            "password_reset",
            serde_json::json!({"email": "jane@example.com"}),
        ));
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["action"]["type"], "password_reset");
        assert_eq!(json["action"]["payload"]["email"], "jane@example.com");

        let bare = serde_json::to_value(StatusUpdate::new(IncidentStatus::Rejected)).unwrap();
        assert!(bare.get("action").is_none());
    }

    #[test]
    fn test_decision_statuses() {
        assert_eq!(Decision::Approve.resulting_status(), IncidentStatus::Resolved);
        assert_eq!(Decision::Reject.resulting_status(), IncidentStatus::Rejected);
    }
}
