//! Per-backend configuration access.

use chrono::Utc;
use tracing::{info, warn};

use super::{ConsoleError, health};
use crate::domain::{BackendId, ConfigMap, McpServer};
use crate::ports::{BackendPort, Backends};

/// Reads and writes the configuration map of a single backend.
#[derive(Debug, Clone)]
pub struct ConfigGateway {
    backends: Backends,
}

impl ConfigGateway {
    pub const fn new(backends: Backends) -> Self {
        Self { backends }
    }

    fn port(&self, server_id: &str) -> Result<&dyn BackendPort, ConsoleError> {
        let id = BackendId::parse(server_id)
            .ok_or_else(|| ConsoleError::UnknownServer(server_id.to_string()))?;
        Ok(self.backends.get(id).as_ref())
    }

    /// Read the current configuration of a server.
    pub async fn get_config(&self, server_id: &str) -> Result<ConfigMap, ConsoleError> {
        let port = self.port(server_id)?;
        port.get_config()
            .await
            .map_err(|e| ConsoleError::backend(port.id(), e))
    }

    /// Replace a server's configuration and ask it to reload.
    ///
    /// The write and the reload go out strictly in that order. A failed
    /// write is reported as [`ConsoleError::ConfigSave`] and skips the
    /// reload; a failed reload after a successful write is reported as
    /// [`ConsoleError::ReloadFailed`]. On success the server is probed again
    /// and the fresh entry returned.
    pub async fn update_config(
        &self,
        server_id: &str,
        config: &ConfigMap,
    ) -> Result<McpServer, ConsoleError> {
        let port = self.port(server_id)?;
        let backend = port.id();

        port.put_config(config)
            .await
            .map_err(|source| ConsoleError::ConfigSave { backend, source })?;
        info!(%backend, keys = config.len(), "Configuration saved");

        if let Err(source) = port.reload().await {
            warn!(%backend, error = %source, "Configuration saved but reload failed");
            return Err(ConsoleError::ReloadFailed { backend, source });
        }
        info!(%backend, "Configuration reloaded");

        Ok(health::probe_server(port, Utc::now()).await)
    }

    /// Ask a server to reload its configuration without changing it.
    pub async fn reload(&self, server_id: &str) -> Result<(), ConsoleError> {
        let port = self.port(server_id)?;
        port.reload()
            .await
            .map_err(|e| ConsoleError::backend(port.id(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HealthReport;
    use crate::ports::BackendError;
    use crate::ports::backend::MockBackendPort;
    use mockall::Sequence;
    use std::sync::Arc;

    fn mock(id: BackendId) -> MockBackendPort {
        let mut backend = MockBackendPort::new();
        backend.expect_id().return_const(id);
        backend
            .expect_base_url()
            .return_const(format!("http://{id}.test"));
        backend
    }

    fn gateway(m365: MockBackendPort) -> ConfigGateway {
        let m365: Arc<dyn BackendPort> = Arc::new(m365);
        let snow: Arc<dyn BackendPort> = Arc::new(mock(BackendId::ServiceNow));
        ConfigGateway::new(Backends::new(m365, snow))
    }

    fn tenant_config() -> ConfigMap {
        ConfigMap::from([("M365_TENANT_ID".to_string(), "t1".to_string())])
    }

    fn server_error() -> BackendError {
        BackendError::Http {
            status: 500,
            message: "internal error".to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_puts_then_reloads_then_probes() {
        let mut seq = Sequence::new();
        let mut m365 = mock(BackendId::M365);
        m365.expect_put_config()
            .withf(|config| config.get("M365_TENANT_ID").map(String::as_str) == Some("t1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        m365.expect_reload()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        m365.expect_health()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Ok(HealthReport::from_json(&serde_json::json!({
                    "status": "healthy",
                    "config": {"M365_TENANT_ID": "t1"}
                })))
            });

        let server = gateway(m365)
            .update_config("m365", &tenant_config())
            .await
            .unwrap();
        assert!(server.status.is_online());
        assert_eq!(server.config, tenant_config());
    }

    #[tokio::test]
    async fn test_reload_failure_is_reported_distinctly() {
        let mut m365 = mock(BackendId::M365);
        m365.expect_put_config().returning(|_| Ok(()));
        m365.expect_reload().returning(|| Err(server_error()));

        let err = gateway(m365)
            .update_config("m365", &tenant_config())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::ReloadFailed {
                backend: BackendId::M365,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_save_failure_skips_reload() {
        let mut m365 = mock(BackendId::M365);
        m365.expect_put_config().returning(|_| Err(server_error()));
        m365.expect_reload().never();

        let err = gateway(m365)
            .update_config("m365", &tenant_config())
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigSave { .. }));
    }

    #[tokio::test]
    async fn test_unknown_server_is_rejected() {
        let err = gateway(mock(BackendId::M365))
            .get_config("jira")
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownServer(_)));
    }
}
