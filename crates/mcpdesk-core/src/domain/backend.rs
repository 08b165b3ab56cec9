//! Backend identity and static metadata.
//!
//! The console talks to a fixed set of integration servers. Everything that
//! is known about a backend before it is probed lives here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one backend integration server.
///
/// The serialized form doubles as the record id prefix, so an incident with
/// local id `42` from ServiceNow is addressed as `snow-42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BackendId {
    /// Microsoft 365 family connector.
    #[serde(rename = "m365")]
    M365,
    /// ServiceNow connector.
    #[serde(rename = "snow")]
    ServiceNow,
}

impl BackendId {
    /// All known backends in presentation order.
    pub const ALL: [Self; 2] = [Self::M365, Self::ServiceNow];

    /// Stable short identifier (`m365`, `snow`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M365 => "m365",
            Self::ServiceNow => "snow",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::M365 => "Microsoft 365 Server",
            Self::ServiceNow => "ServiceNow Server",
        }
    }

    /// One-line description shown next to the server.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::M365 => "Handles Microsoft 365 integration and user management",
            Self::ServiceNow => "Manages ServiceNow integration and incident tracking",
        }
    }

    /// Capabilities the backend advertises while it is online.
    #[must_use]
    pub fn capabilities(self) -> Vec<Capability> {
        match self {
            Self::M365 => vec![
                Capability::UserManagement,
                Capability::IncidentManagement,
                Capability::ActivityTracking,
            ],
            Self::ServiceNow => vec![Capability::IncidentManagement, Capability::ActivityTracking],
        }
    }

    /// Parse a backend id, also accepting the long `servicenow` alias that
    /// ServiceNow records use in their own `source` fields.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m365" => Some(Self::M365),
            "snow" | "servicenow" => Some(Self::ServiceNow),
            _ => None,
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BackendId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown backend: {s}"))
    }
}

/// Capability tag advertised by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    UserManagement,
    IncidentManagement,
    ActivityTracking,
}

impl Capability {
    /// Wire name of the capability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserManagement => "user_management",
            Self::IncidentManagement => "incident_management",
            Self::ActivityTracking => "activity_tracking",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
