//! Aggregator - fans out to both backends and merges their records.
//!
//! Calls to different backends are issued concurrently and awaited together.
//! A failure on one backend never aborts the other; it is recorded in the
//! returned [`Aggregated`] instead.

use chrono::Utc;
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info};

use super::{Aggregated, ConsoleError, Coverage, health};
use crate::domain::{Activity, BackendId, Incident, McpServer, RecordId, StatusUpdate};
use crate::normalize::{apply_update_response, normalize_activities, normalize_incidents};
use crate::ports::Backends;

/// Everything the dashboard shows, fetched in one go.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub servers: Vec<McpServer>,
    pub incidents: Aggregated<Incident>,
    pub activities: Aggregated<Activity>,
}

impl Snapshot {
    /// Coverage across incidents and activities.
    pub fn coverage(&self) -> Coverage {
        match (self.incidents.coverage(), self.activities.coverage()) {
            (Coverage::Complete, Coverage::Complete) => Coverage::Complete,
            (Coverage::Unavailable, Coverage::Unavailable) => Coverage::Unavailable,
            _ => Coverage::Partial,
        }
    }
}

/// Counts shown in the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub servers_online: usize,
    pub servers_total: usize,
    pub open_incidents: usize,
    pub total_incidents: usize,
    pub activities: usize,
}

impl From<&Snapshot> for SnapshotSummary {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            servers_online: snapshot
                .servers
                .iter()
                .filter(|s| s.status.is_online())
                .count(),
            servers_total: snapshot.servers.len(),
            open_incidents: snapshot
                .incidents
                .items
                .iter()
                .filter(|i| i.status.is_actionable())
                .count(),
            total_incidents: snapshot.incidents.items.len(),
            activities: snapshot.activities.items.len(),
        }
    }
}

/// Service that aggregates servers, incidents and activities.
#[derive(Debug, Clone)]
pub struct Aggregator {
    backends: Backends,
}

impl Aggregator {
    /// Create a new aggregator over the given backends.
    pub const fn new(backends: Backends) -> Self {
        Self { backends }
    }

    /// Probe every backend; one entry per backend, M365 first.
    pub async fn list_servers(&self) -> Vec<McpServer> {
        let now = Utc::now();
        join_all(
            self.backends
                .iter()
                .map(|backend| health::probe_server(backend.as_ref(), now)),
        )
        .await
    }

    /// Probe a single backend by server id.
    pub async fn get_server(&self, server_id: &str) -> Result<McpServer, ConsoleError> {
        let id = BackendId::parse(server_id)
            .ok_or_else(|| ConsoleError::UnknownServer(server_id.to_string()))?;
        Ok(health::probe_server(self.backends.get(id).as_ref(), Utc::now()).await)
    }

    /// Fetch and normalize incidents from every backend.
    pub async fn list_incidents(&self) -> Aggregated<Incident> {
        let now = Utc::now();
        let fetches = self.backends.iter().map(|backend| async move {
            let id = backend.id();
            let result = backend
                .list_incidents()
                .await
                .map(|raws| normalize_incidents(&raws, id, now));
            (id, result)
        });
        let aggregated = Aggregated::from_results("incidents", join_all(fetches).await);
        debug!(
            count = aggregated.items.len(),
            failed = aggregated.failures.len(),
            "Aggregated incidents"
        );
        aggregated
    }

    /// Fetch and normalize activities from every backend.
    pub async fn list_activities(&self) -> Aggregated<Activity> {
        let now = Utc::now();
        let fetches = self.backends.iter().map(|backend| async move {
            let id = backend.id();
            let result = backend
                .list_activities()
                .await
                .map(|raws| normalize_activities(&raws, id, now));
            (id, result)
        });
        let aggregated = Aggregated::from_results("activities", join_all(fetches).await);
        debug!(
            count = aggregated.items.len(),
            failed = aggregated.failures.len(),
            "Aggregated activities"
        );
        aggregated
    }

    /// Look up one incident on the backend its id names.
    pub async fn get_incident(&self, id: &RecordId) -> Result<Incident, ConsoleError> {
        let source = id.source();
        let raws = self
            .backends
            .get(source)
            .list_incidents()
            .await
            .map_err(|e| ConsoleError::backend(source, e))?;

        normalize_incidents(&raws, source, Utc::now())
            .into_iter()
            .find(|incident| incident.id == *id)
            .ok_or_else(|| ConsoleError::NotFound {
                kind: "incident",
                id: id.to_string(),
            })
    }

    /// Update an incident's status given its composite id string.
    ///
    /// Fails with [`ConsoleError::UnknownSource`] if the prefix names no
    /// backend.
    pub async fn update_incident_status(
        &self,
        id: &str,
        update: StatusUpdate,
    ) -> Result<Incident, ConsoleError> {
        let id = RecordId::parse(id)?;
        self.update_incident(&id, update, None).await
    }

    /// Send a status update to the incident's own backend.
    ///
    /// `previous` is the caller's last snapshot of the incident; fields the
    /// backend omits from its response are taken from it.
    pub async fn update_incident(
        &self,
        id: &RecordId,
        update: StatusUpdate,
        previous: Option<&Incident>,
    ) -> Result<Incident, ConsoleError> {
        let source = id.source();
        let raw = self
            .backends
            .get(source)
            .update_incident(id.local_id(), &update)
            .await
            .map_err(|e| ConsoleError::backend(source, e))?;

        info!(incident = %id, status = %update.status, "Incident status updated");
        Ok(apply_update_response(
            id,
            &raw,
            update.status,
            previous,
            Utc::now(),
        ))
    }

    /// Fetch servers, incidents and activities concurrently.
    pub async fn refresh(&self) -> Snapshot {
        let (servers, incidents, activities) = tokio::join!(
            self.list_servers(),
            self.list_incidents(),
            self.list_activities()
        );
        Snapshot {
            servers,
            incidents,
            activities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthReport, IncidentStatus, RawIncident};
    use crate::ports::backend::MockBackendPort;
    use crate::ports::{BackendError, BackendPort};
    use serde_json::json;
    use std::sync::Arc;

    fn mock(id: BackendId) -> MockBackendPort {
        let mut backend = MockBackendPort::new();
        backend.expect_id().return_const(id);
        backend
            .expect_base_url()
            .return_const(format!("http://{id}.test"));
        backend
    }

    fn backends(m365: MockBackendPort, snow: MockBackendPort) -> Backends {
        let m365: Arc<dyn BackendPort> = Arc::new(m365);
        let snow: Arc<dyn BackendPort> = Arc::new(snow);
        Backends::new(m365, snow)
    }

    fn incidents(ids: &[&str]) -> Vec<RawIncident> {
        ids.iter()
            .map(|id| RawIncident::from_json(&json!({"id": id, "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"})))
            .collect()
    }

    #[tokio::test]
    async fn test_update_routes_to_servicenow_with_local_id() {
        let m365 = mock(BackendId::M365);
        let mut snow = mock(BackendId::ServiceNow);
        snow.expect_update_incident()
            .withf(|local_id, update| local_id == "42" && update.status == IncidentStatus::Resolved)
            .times(1)
            .returning(|_, _| Ok(RawIncident::from_json(&json!({"id": "42", "status": "closed"}))));

        let aggregator = Aggregator::new(backends(m365, snow));
        let incident = aggregator
            .update_incident_status("snow-42", StatusUpdate::new(IncidentStatus::Resolved))
            .await
            .unwrap();

        assert_eq!(incident.id.to_string(), "snow-42");
        assert_eq!(incident.source, BackendId::ServiceNow);
        assert_eq!(incident.status, IncidentStatus::Resolved);
    }

    #[tokio::test]
    async fn test_update_unknown_source_never_reaches_a_backend() {
        let aggregator = Aggregator::new(backends(mock(BackendId::M365), mock(BackendId::ServiceNow)));
        let err = aggregator
            .update_incident_status("bogus-1", StatusUpdate::new(IncidentStatus::Resolved))
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownSource(ref p) if p == "bogus"));
    }

    #[tokio::test]
    async fn test_update_failure_propagates() {
        let mut m365 = mock(BackendId::M365);
        m365.expect_update_incident().returning(|_, _| {
            Err(BackendError::Http {
                status: 404,
                message: "no such incident".to_string(),
            })
        });
        let aggregator = Aggregator::new(backends(m365, mock(BackendId::ServiceNow)));
        let err = aggregator
            .update_incident_status("m365-9", StatusUpdate::new(IncidentStatus::Rejected))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::Backend {
                backend: BackendId::M365,
                source: BackendError::Http { status: 404, .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_incidents_concatenate_in_backend_order() {
        let mut m365 = mock(BackendId::M365);
        m365.expect_list_incidents()
            .returning(|| Ok(incidents(&["2", "1"])));
        let mut snow = mock(BackendId::ServiceNow);
        snow.expect_list_incidents()
            .returning(|| Ok(incidents(&["1"])));

        let aggregated = Aggregator::new(backends(m365, snow)).list_incidents().await;
        let ids: Vec<String> = aggregated.items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["m365-2", "m365-1", "snow-1"]);
        assert_eq!(aggregated.coverage(), Coverage::Complete);
    }

    #[tokio::test]
    async fn test_incidents_isolate_backend_failure() {
        let mut m365 = mock(BackendId::M365);
        m365.expect_list_incidents().returning(|| {
            Err(BackendError::Transport {
                message: "connection refused".to_string(),
            })
        });
        let mut snow = mock(BackendId::ServiceNow);
        snow.expect_list_incidents()
            .returning(|| Ok(incidents(&["7", "8"])));

        let aggregated = Aggregator::new(backends(m365, snow)).list_incidents().await;
        let ids: Vec<String> = aggregated.items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["snow-7", "snow-8"]);
        assert_eq!(aggregated.coverage(), Coverage::Partial);
        assert_eq!(aggregated.failed_backends(), vec![BackendId::M365]);
    }

    #[tokio::test]
    async fn test_servers_isolate_probe_failure() {
        let mut m365 = mock(BackendId::M365);
        m365.expect_health()
            .returning(|| Ok(HealthReport::from_json(&json!({"status": "healthy"}))));
        let mut snow = mock(BackendId::ServiceNow);
        snow.expect_health().returning(|| {
            Err(BackendError::Transport {
                message: "network unreachable".to_string(),
            })
        });

        let servers = Aggregator::new(backends(m365, snow)).list_servers().await;
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].id, BackendId::M365);
        assert!(servers[0].status.is_online());
        assert_eq!(servers[1].id, BackendId::ServiceNow);
        assert!(!servers[1].status.is_online());
        assert!(servers[1].capabilities.is_empty());
    }

    #[tokio::test]
    async fn test_get_server_rejects_unknown_id() {
        let aggregator = Aggregator::new(backends(mock(BackendId::M365), mock(BackendId::ServiceNow)));
        let err = aggregator.get_server("jira").await.unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownServer(ref s) if s == "jira"));
    }

    #[tokio::test]
    async fn test_get_incident_only_queries_its_backend() {
        let m365 = mock(BackendId::M365);
        let mut snow = mock(BackendId::ServiceNow);
        snow.expect_list_incidents()
            .times(2)
            .returning(|| Ok(incidents(&["1", "2"])));
        let aggregator = Aggregator::new(backends(m365, snow));

        let found = aggregator
            .get_incident(&RecordId::new(BackendId::ServiceNow, "2"))
            .await
            .unwrap();
        assert_eq!(found.id.local_id(), "2");

        let missing = aggregator
            .get_incident(&RecordId::new(BackendId::ServiceNow, "3"))
            .await
            .unwrap_err();
        assert!(matches!(missing, ConsoleError::NotFound { kind: "incident", .. }));
    }
}
