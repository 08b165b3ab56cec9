//! Backend server status as seen by the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{BackendId, Capability};

/// Key/value configuration map stored on a backend.
///
/// The console never interprets keys or values; they are edited by the
/// operator and written back verbatim.
pub type ConfigMap = BTreeMap<String, String>;

/// Reachability of a backend at probe time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    #[default]
    Offline,
}

impl ServerStatus {
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// One backend integration server, rebuilt on every probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServer {
    pub id: BackendId,
    pub name: String,
    pub description: String,
    pub url: String,
    pub status: ServerStatus,
    pub capabilities: Vec<Capability>,
    /// Time of the last successful probe; `None` while offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: ConfigMap,
}

impl McpServer {
    /// A server that answered its health check.
    pub fn online(id: BackendId, url: impl Into<String>, config: ConfigMap, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            description: id.description().to_string(),
            url: url.into(),
            status: ServerStatus::Online,
            capabilities: id.capabilities(),
            last_seen: Some(now),
            config,
        }
    }

    /// A server that could not be reached or reported itself unhealthy.
    ///
    /// Offline servers advertise no capabilities.
    pub fn offline(id: BackendId, url: impl Into<String>) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            description: id.description().to_string(),
            url: url.into(),
            status: ServerStatus::Offline,
            capabilities: Vec::new(),
            last_seen: None,
            config: ConfigMap::new(),
        }
    }
}
