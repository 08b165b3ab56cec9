//! Record normalization.
//!
//! Maps raw backend records into the unified [`Incident`] and [`Activity`]
//! shapes. Every function here is total: missing or malformed fields fall
//! back to defaults so that one bad record never hides the others.
//!
//! Records without a backend-local id cannot be addressed later, so the
//! list helpers drop them (with a warning) before normalizing.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use crate::domain::{
    Activity, ActivityKind, ActivityStatus, BackendId, Incident, IncidentStatus, Payload,
    Priority, RawActivity, RawIncident, RecordId,
};

/// Target recorded when a backend does not name one.
const DEFAULT_ACTIVITY_TARGET: &str = "client";

/// Title used when a backend sends none.
pub const fn default_title(source: BackendId) -> &'static str {
    match source {
        BackendId::M365 => "M365 Password Reset Request",
        BackendId::ServiceNow => "ServiceNow Incident",
    }
}

/// Description used when a backend sends none.
pub const fn default_description(source: BackendId) -> &'static str {
    match source {
        BackendId::M365 => "User requested password reset",
        BackendId::ServiceNow => "ServiceNow incident created",
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and naive ISO-8601 (as produced by Python's
/// `datetime.isoformat()`), the latter interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn timestamp_or(raw: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(parse_timestamp).unwrap_or(fallback)
}

fn incident_status(raw: Option<&str>) -> Option<IncidentStatus> {
    raw.and_then(IncidentStatus::from_backend)
}

fn non_empty(raw: Option<&String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty()).cloned()
}

/// Normalize one raw incident whose local id is already known.
pub fn normalize_incident(
    local_id: &str,
    raw: &RawIncident,
    source: BackendId,
    now: DateTime<Utc>,
) -> Incident {
    Incident {
        id: RecordId::new(source, local_id),
        source,
        title: non_empty(raw.title.as_ref()).unwrap_or_else(|| default_title(source).to_string()),
        description: non_empty(raw.description.as_ref())
            .unwrap_or_else(|| default_description(source).to_string()),
        status: incident_status(raw.status.as_deref()).unwrap_or_default(),
        priority: raw
            .priority
            .as_deref()
            .and_then(Priority::from_backend)
            .unwrap_or_default(),
        created_at: timestamp_or(raw.created_at.as_deref(), now),
        updated_at: timestamp_or(raw.updated_at.as_deref(), now),
        target_user: raw.target_user.clone(),
        action: raw.action.clone(),
    }
}

/// Normalize one raw activity whose local id is already known.
pub fn normalize_activity(
    local_id: &str,
    raw: &RawActivity,
    source: BackendId,
    now: DateTime<Utc>,
) -> Activity {
    Activity {
        id: RecordId::new(source, local_id),
        timestamp: timestamp_or(raw.timestamp.as_deref(), now),
        kind: non_empty(raw.kind.as_ref()).map(ActivityKind::from).unwrap_or_default(),
        source,
        target: non_empty(raw.target.as_ref())
            .unwrap_or_else(|| DEFAULT_ACTIVITY_TARGET.to_string()),
        payload: raw.payload.clone().unwrap_or_else(Payload::empty),
        status: raw
            .status
            .as_deref()
            .and_then(ActivityStatus::from_backend)
            .unwrap_or_default(),
        error: non_empty(raw.error.as_ref()),
    }
}

/// Normalize a backend's incident list, preserving its order.
pub fn normalize_incidents(
    raws: &[RawIncident],
    source: BackendId,
    now: DateTime<Utc>,
) -> Vec<Incident> {
    raws.iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let Some(local_id) = raw.local_id() else {
                warn!(backend = %source, index, "Dropping incident without an id");
                return None;
            };
            Some(normalize_incident(local_id, raw, source, now))
        })
        .collect()
}

/// Normalize a backend's activity list, preserving its order.
pub fn normalize_activities(
    raws: &[RawActivity],
    source: BackendId,
    now: DateTime<Utc>,
) -> Vec<Activity> {
    raws.iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let Some(local_id) = raw.local_id() else {
                warn!(backend = %source, index, "Dropping activity without an id");
                return None;
            };
            Some(normalize_activity(local_id, raw, source, now))
        })
        .collect()
}

/// Build the incident returned by a status update.
///
/// The backend's PATCH response may be partial. Fields it carries win; with a
/// `previous` snapshot the missing ones are taken from it, otherwise they fall
/// back to the usual defaults. The status falls back to the requested one and
/// `updated_at` to `now`.
pub fn apply_update_response(
    id: &RecordId,
    raw: &RawIncident,
    requested: IncidentStatus,
    previous: Option<&Incident>,
    now: DateTime<Utc>,
) -> Incident {
    let status = incident_status(raw.status.as_deref()).unwrap_or(requested);
    let updated_at = timestamp_or(raw.updated_at.as_deref(), now);

    let Some(previous) = previous else {
        let mut incident = normalize_incident(id.local_id(), raw, id.source(), now);
        incident.status = status;
        incident.updated_at = updated_at;
        return incident;
    };

    Incident {
        id: id.clone(),
        source: id.source(),
        title: non_empty(raw.title.as_ref()).unwrap_or_else(|| previous.title.clone()),
        description: non_empty(raw.description.as_ref())
            .unwrap_or_else(|| previous.description.clone()),
        status,
        priority: raw
            .priority
            .as_deref()
            .and_then(Priority::from_backend)
            .unwrap_or(previous.priority),
        created_at: raw
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(previous.created_at),
        updated_at,
        target_user: raw
            .target_user
            .clone()
            .or_else(|| previous.target_user.clone()),
        action: raw.action.clone().or_else(|| previous.action.clone()),
    }
}
