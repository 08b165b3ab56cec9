//! Health probing.
//!
//! A probe never fails: an unreachable or unhealthy backend is simply
//! reported offline.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{ConfigMap, McpServer};
use crate::ports::BackendPort;

/// Outcome of one health probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Probe {
    pub online: bool,
    /// Configuration snapshot embedded in the health response.
    pub config: ConfigMap,
}

/// Query a backend's health endpoint.
pub async fn probe(backend: &dyn BackendPort) -> Probe {
    match backend.health().await {
        Ok(report) if report.is_healthy() => Probe {
            online: true,
            config: report.config,
        },
        Ok(report) => {
            debug!(
                backend = %backend.id(),
                status = report.status.as_deref().unwrap_or("<missing>"),
                "Backend reported unhealthy"
            );
            Probe::default()
        }
        Err(e) => {
            warn!(backend = %backend.id(), error = %e, "Health probe failed");
            Probe::default()
        }
    }
}

/// Probe a backend and describe it as a server entry.
pub async fn probe_server(backend: &dyn BackendPort, now: DateTime<Utc>) -> McpServer {
    let outcome = probe(backend).await;
    if outcome.online {
        McpServer::online(backend.id(), backend.base_url(), outcome.config, now)
    } else {
        McpServer::offline(backend.id(), backend.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackendId, HealthReport, ServerStatus};
    use crate::ports::backend::MockBackendPort;
    use crate::ports::BackendError;

    fn mock(id: BackendId) -> MockBackendPort {
        let mut backend = MockBackendPort::new();
        backend.expect_id().return_const(id);
        backend
            .expect_base_url()
            .return_const("http://backend.test".to_string());
        backend
    }

    #[tokio::test]
    async fn test_healthy_backend_is_online_with_config() {
        let mut backend = mock(BackendId::M365);
        backend.expect_health().returning(|| {
            Ok(HealthReport::from_json(&serde_json::json!({
                "status": "healthy",
                "config": {"tenant_id": "t1"}
            })))
        });

        let server = probe_server(&backend, Utc::now()).await;
        assert_eq!(server.status, ServerStatus::Online);
        assert_eq!(server.config.get("tenant_id").map(String::as_str), Some("t1"));
        assert_eq!(server.capabilities, BackendId::M365.capabilities());
    }

    #[tokio::test]
    async fn test_unhealthy_status_is_offline() {
        let mut backend = mock(BackendId::ServiceNow);
        backend.expect_health().returning(|| {
            Ok(HealthReport {
                status: Some("starting".to_string()),
                config: ConfigMap::new(),
            })
        });

        let outcome = probe(&backend).await;
        assert!(!outcome.online);
    }

    #[tokio::test]
    async fn test_probe_error_does_not_propagate() {
        let mut backend = mock(BackendId::ServiceNow);
        backend.expect_health().returning(|| {
            Err(BackendError::Transport {
                message: "connection refused".to_string(),
            })
        });

        let server = probe_server(&backend, Utc::now()).await;
        assert_eq!(server.status, ServerStatus::Offline);
        assert!(server.capabilities.is_empty());
        assert_eq!(server.url, "http://backend.test");
    }
}
