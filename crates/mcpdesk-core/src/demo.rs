//! In-memory backends for demo mode.
//!
//! [`DemoBackend`] implements [`BackendPort`] over seeded records held in
//! memory, so the console can run without either backend server. Writes
//! mutate the in-memory state and are visible to later reads on the same
//! instance.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{
    BackendId, ConfigMap, HealthReport, NewIncident, PasswordReset, Payload, RawActivity,
    RawIncident, StatusUpdate,
};
use crate::ports::{BackendError, BackendPort, BackendResult};

#[derive(Debug)]
struct DemoState {
    incidents: Vec<Value>,
    activities: Vec<Value>,
    config: ConfigMap,
    next_incident: u32,
    next_activity: u32,
}

impl DemoState {
    fn record_activity(&mut self, source: BackendId, kind: &str, target: &str, payload: Value) {
        self.next_activity += 1;
        self.activities.push(json!({
            "id": format!("ACT{:03}", self.next_activity),
            "timestamp": Utc::now().to_rfc3339(),
            "type": kind,
            "source": source.as_str(),
            "target": target,
            "payload": payload,
            "status": "completed",
        }));
    }
}

/// A backend served from memory.
#[derive(Debug)]
pub struct DemoBackend {
    id: BackendId,
    url: String,
    online: bool,
    state: Mutex<DemoState>,
}

impl DemoBackend {
    /// Demo Microsoft 365 backend with a locked-out user incident.
    pub fn m365() -> Self {
        Self::seeded(
            BackendId::M365,
            vec![json!({
                "id": "INC001",
                "title": "User Account Locked",
                "description": "User account has been locked due to multiple failed login attempts",
                "status": "open",
                "priority": "high",
                "created_at": "2024-03-01T09:15:00Z",
                "updated_at": "2024-03-01T09:15:00Z",
                "target_user": {"id": "user1", "email": "user1@example.com", "name": "John Doe"},
            })],
            vec![
                json!({
                    "id": "ACT001",
                    "timestamp": "2024-03-01T09:15:02Z",
                    "type": "incident_created",
                    "target": "snow",
                    "payload": {"incidentId": "INC001", "userId": "user1"},
                    "status": "completed",
                }),
                json!({
                    "id": "ACT003",
                    "timestamp": "2024-03-01T11:40:00Z",
                    "type": "config_updated",
                    "target": "m365",
                    "payload": {"serverId": "m365", "config": {"clientId": "new-client-id"}},
                    "status": "completed",
                }),
            ],
            [
                ("M365_TENANT_ID", "demo-tenant-id"),
                ("M365_CLIENT_ID", "demo-client-id"),
                ("M365_CLIENT_SECRET", "********"),
            ],
        )
    }

    /// Demo ServiceNow backend with one in-progress incident.
    pub fn servicenow() -> Self {
        Self::seeded(
            BackendId::ServiceNow,
            vec![json!({
                "id": "INC002",
                "title": "Service Degradation",
                "description": "Service is experiencing slow response times",
                "status": "in_progress",
                "priority": "medium",
                "created_at": "2024-03-01T10:02:00Z",
                "updated_at": "2024-03-01T10:30:00Z",
                "target_user": {"id": "user2", "email": "user2@example.com", "name": "Jane Smith"},
            })],
            vec![json!({
                "id": "ACT002",
                "timestamp": "2024-03-01T10:30:00Z",
                "type": "incident_updated",
                "target": "m365",
                "payload": {"incidentId": "INC002", "status": "in_progress"},
                "status": "completed",
            })],
            [
                ("SNOW_INSTANCE", "demo-instance.service-now.com"),
                ("SNOW_USERNAME", "demo-username"),
                ("SNOW_PASSWORD", "********"),
            ],
        )
    }

    /// A backend that cannot be reached; every call fails with a transport error.
    pub fn offline(id: BackendId) -> Self {
        let mut backend = Self::seeded(id, Vec::new(), Vec::new(), []);
        backend.online = false;
        backend
    }

    fn seeded<const N: usize>(
        id: BackendId,
        incidents: Vec<Value>,
        activities: Vec<Value>,
        config: [(&str, &str); N],
    ) -> Self {
        let next_incident = 100 + u32::try_from(incidents.len()).unwrap_or(0);
        let next_activity = 100 + u32::try_from(activities.len()).unwrap_or(0);
        Self {
            id,
            url: format!("demo://{id}"),
            online: true,
            state: Mutex::new(DemoState {
                incidents,
                activities,
                config: config
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                next_incident,
                next_activity,
            }),
        }
    }

    async fn state(&self) -> BackendResult<MutexGuard<'_, DemoState>> {
        if !self.online {
            return Err(BackendError::Transport {
                message: format!("{} is offline", self.url),
            });
        }
        Ok(self.state.lock().await)
    }

    fn unsupported(&self, operation: &'static str) -> BackendError {
        BackendError::Unsupported {
            backend: self.id,
            operation,
        }
    }
}

#[async_trait]
impl BackendPort for DemoBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    fn base_url(&self) -> String {
        self.url.clone()
    }

    async fn health(&self) -> BackendResult<HealthReport> {
        let state = self.state().await?;
        Ok(HealthReport {
            status: Some("healthy".to_string()),
            config: state.config.clone(),
        })
    }

    async fn list_incidents(&self) -> BackendResult<Vec<RawIncident>> {
        let state = self.state().await?;
        Ok(state.incidents.iter().map(RawIncident::from_json).collect())
    }

    async fn update_incident(
        &self,
        local_id: &str,
        update: &StatusUpdate,
    ) -> BackendResult<RawIncident> {
        let mut state = self.state().await?;
        let Some(record) = state
            .incidents
            .iter_mut()
            .find(|r| RawIncident::from_json(r).local_id() == Some(local_id))
        else {
            return Err(BackendError::Http {
                status: 404,
                message: format!("Incident {local_id} not found"),
            });
        };

        record["status"] = json!(update.status.as_str());
        record["updated_at"] = json!(Utc::now().to_rfc3339());
        if let Some(action) = &update.action {
            record["action"] = json!({
                "type": action.action_type,
                "status": "completed",
                "result": action.payload.as_value(),
            });
        }
        let updated = RawIncident::from_json(record);

        let target = self.id.as_str();
        state.record_activity(
            self.id,
            "incident_updated",
            target,
            json!({"incidentId": local_id, "status": update.status.as_str()}),
        );
        Ok(updated)
    }

    async fn list_activities(&self) -> BackendResult<Vec<RawActivity>> {
        let state = self.state().await?;
        Ok(state.activities.iter().map(RawActivity::from_json).collect())
    }

    async fn get_config(&self) -> BackendResult<ConfigMap> {
        Ok(self.state().await?.config.clone())
    }

    async fn put_config(&self, config: &ConfigMap) -> BackendResult<()> {
        let mut state = self.state().await?;
        state.config = config.clone();
        let target = self.id.as_str();
        state.record_activity(
            self.id,
            "config_updated",
            target,
            json!({"serverId": target, "keys": config.keys().collect::<Vec<_>>()}),
        );
        Ok(())
    }

    async fn reload(&self) -> BackendResult<()> {
        self.state().await.map(|_| ())
    }

    async fn reset_password(&self, reset: &PasswordReset) -> BackendResult<Payload> {
        if self.id != BackendId::M365 {
            return Err(self.unsupported("password reset"));
        }
        let mut state = self.state().await?;
        state.record_activity(
            self.id,
            "password_reset",
            "m365",
            json!({"email": reset.user_email, "forceChange": reset.force_change}),
        );
        Ok(Payload::new(json!({
            "success": true,
            "message": format!("Password reset for {}", reset.user_email),
        })))
    }

    async fn create_incident(&self, incident: &NewIncident) -> BackendResult<Payload> {
        if self.id != BackendId::ServiceNow {
            return Err(self.unsupported("incident creation"));
        }
        let mut state = self.state().await?;
        state.next_incident += 1;
        let number = format!("INC{:04}", state.next_incident);
        let now = Utc::now().to_rfc3339();
        let record = json!({
            "id": number,
            "title": incident.title,
            "description": incident.description,
            "status": "open",
            "priority": incident.priority,
            "category": incident.category,
            "created_at": now,
            "updated_at": now,
        });
        state.incidents.push(record.clone());
        state.record_activity(
            self.id,
            "incident_created",
            "snow",
            json!({"incidentId": number}),
        );
        Ok(Payload::new(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IncidentStatus;

    #[tokio::test]
    async fn test_seeded_backends_are_healthy() {
        for backend in [DemoBackend::m365(), DemoBackend::servicenow()] {
            let report = backend.health().await.unwrap();
            assert!(report.is_healthy());
            assert!(!report.config.is_empty());
            assert_eq!(backend.list_incidents().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_offline_backend_fails_with_transport_error() {
        let backend = DemoBackend::offline(BackendId::M365);
        let err = backend.list_incidents().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_update_is_visible_to_later_reads() {
        let backend = DemoBackend::m365();
        let before = backend.list_activities().await.unwrap().len();

        let updated = backend
            .update_incident("INC001", &StatusUpdate::new(IncidentStatus::Resolved))
            .await
            .unwrap();
        assert_eq!(updated.status.as_deref(), Some("resolved"));

        let incidents = backend.list_incidents().await.unwrap();
        assert_eq!(incidents[0].status.as_deref(), Some("resolved"));
        assert_eq!(backend.list_activities().await.unwrap().len(), before + 1);
    }

    #[tokio::test]
    async fn test_update_unknown_incident_is_not_found() {
        let err = DemoBackend::servicenow()
            .update_incident("nope", &StatusUpdate::new(IncidentStatus::Rejected))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_password_reset_only_on_m365() {
        let reset = PasswordReset::forced("user1@example.com", "pw");
        assert!(DemoBackend::m365().reset_password(&reset).await.is_ok());
        let err = DemoBackend::servicenow()
            .reset_password(&reset)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_created_incident_is_listed() {
        let backend = DemoBackend::servicenow();
        backend
            .create_incident(&NewIncident {
                title: "VPN down".to_string(),
                description: "Remote users cannot connect".to_string(),
                priority: "2".to_string(),
                category: "network".to_string(),
            })
            .await
            .unwrap();
        let incidents = backend.list_incidents().await.unwrap();
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[1].title.as_deref(), Some("VPN down"));
    }
}
