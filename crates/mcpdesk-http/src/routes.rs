//! Route tables for each backend, as path segments relative to the base URL.

use mcpdesk_core::BackendId;

pub(crate) type Route = &'static [&'static str];

pub(crate) const HEALTH: Route = &["health"];
pub(crate) const CONFIG: Route = &["api", "mcp", "config"];
pub(crate) const RELOAD: Route = &["api", "mcp", "reload"];

/// Backend-specific endpoints. `None` marks an operation the backend lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BackendRoutes {
    /// GET lists incidents; PATCH `<incidents>/<id>` updates one.
    pub incidents: Route,
    pub activities: Route,
    pub password_reset: Option<Route>,
    /// POST creates an incident.
    pub create_incident: Option<Route>,
}

impl BackendRoutes {
    pub(crate) const fn for_backend(id: BackendId) -> Self {
        match id {
            BackendId::M365 => Self {
                incidents: &["api", "mcp", "family", "incidents"],
                activities: &["api", "mcp", "family", "activities"],
                password_reset: Some(&["api", "mcp", "family", "password", "reset"]),
                create_incident: None,
            },
            BackendId::ServiceNow => Self {
                incidents: &["api", "mcp", "incident"],
                activities: &["api", "mcp", "activities"],
                password_reset: None,
                create_incident: Some(&["api", "mcp", "incident"]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_match_routes() {
        let m365 = BackendRoutes::for_backend(BackendId::M365);
        assert!(m365.password_reset.is_some());
        assert!(m365.create_incident.is_none());

        let snow = BackendRoutes::for_backend(BackendId::ServiceNow);
        assert!(snow.password_reset.is_none());
        assert_eq!(snow.create_incident, Some(snow.incidents));
    }
}
