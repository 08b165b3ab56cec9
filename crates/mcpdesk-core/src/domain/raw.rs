//! Raw backend records.
//!
//! Backends return loosely-typed JSON. These types capture the fields the
//! console cares about, each optional, and are built with lenient extractors
//! that never fail: a field of the wrong type is treated as absent.

use serde_json::Value;

use super::{ActionStatus, ConfigMap, IncidentAction, Payload, TargetUser};

/// Incident as returned by a backend, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawIncident {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub target_user: Option<TargetUser>,
    pub action: Option<IncidentAction>,
}

impl RawIncident {
    /// Extract an incident from arbitrary JSON.
    ///
    /// Accepts both snake_case and camelCase field names, and the ServiceNow
    /// table API names (`sys_id`, `short_description`, `state`).
    pub fn from_json(value: &Value) -> Self {
        Self {
            id: scalar_field(value, &["id", "sys_id", "number"]),
            title: string_field(value, &["title", "short_description"]),
            description: string_field(value, &["description"]),
            status: scalar_field(value, &["status", "state"]),
            priority: scalar_field(value, &["priority", "urgency"]),
            created_at: string_field(value, &["created_at", "createdAt", "sys_created_on"]),
            updated_at: string_field(value, &["updated_at", "updatedAt", "sys_updated_on"]),
            target_user: field(value, &["target_user", "targetUser"]).and_then(target_user),
            action: value.get("action").and_then(incident_action),
        }
    }

    /// The backend-local id, if present and non-empty.
    pub fn local_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// Activity as returned by a backend, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawActivity {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub kind: Option<String>,
    pub target: Option<String>,
    pub payload: Option<Payload>,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl RawActivity {
    pub fn from_json(value: &Value) -> Self {
        Self {
            id: scalar_field(value, &["id"]),
            timestamp: string_field(value, &["timestamp", "created_at"]),
            kind: string_field(value, &["type", "kind"]),
            target: string_field(value, &["target"]),
            payload: value
                .get("payload")
                .filter(|p| !p.is_null())
                .cloned()
                .map(Payload::new),
            status: string_field(value, &["status"]),
            error: string_field(value, &["error"]),
        }
    }

    pub fn local_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// Response of a backend's `/health` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub status: Option<String>,
    pub config: ConfigMap,
}

impl HealthReport {
    pub fn from_json(value: &Value) -> Self {
        Self {
            status: string_field(value, &["status"]),
            config: value.get("config").map(config_map).unwrap_or_default(),
        }
    }

    /// Only an explicit `"healthy"` status counts as online.
    pub fn is_healthy(&self) -> bool {
        self.status.as_deref() == Some("healthy")
    }
}

/// Flatten a JSON object into a string map.
///
/// Scalars are rendered as strings, `null` entries are dropped and nested
/// values are kept as compact JSON. Anything other than an object yields an
/// empty map.
pub fn config_map(value: &Value) -> ConfigMap {
    let Some(object) = value.as_object() else {
        return ConfigMap::new();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), rendered))
        })
        .collect()
}

fn field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| value.get(*name).filter(|v| !v.is_null()))
}

fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| value.get(*name).and_then(Value::as_str))
        .map(String::from)
}

/// Like `string_field` but also accepts numbers (`"id": 42`).
fn scalar_field(value: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match value.get(*name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn target_user(value: &Value) -> Option<TargetUser> {
    let email = string_field(value, &["email", "mail"])?;
    let name = string_field(value, &["name", "display_name", "displayName"])
        .unwrap_or_else(|| email.clone());
    Some(TargetUser {
        email,
        name,
        id: scalar_field(value, &["id"]),
    })
}

fn incident_action(value: &Value) -> Option<IncidentAction> {
    let action_type = string_field(value, &["type"])?;
    let status = string_field(value, &["status"])
        .and_then(|s| ActionStatus::from_backend(&s))
        .unwrap_or_default();
    Some(IncidentAction {
        action_type,
        status,
        result: field(value, &["result"]).cloned().map(Payload::new),
    })
}
