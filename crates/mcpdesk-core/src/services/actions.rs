//! Operator actions on incidents and users.

use serde_json::json;
use tracing::info;

use super::{Aggregator, ConsoleError};
use crate::domain::{
    ActionRequest, BackendId, Decision, Incident, NewIncident, PasswordReset, Payload,
    StatusUpdate,
};
use crate::ports::Backends;

/// Action type recorded on an incident resolved by a password reset.
pub const PASSWORD_RESET_ACTION: &str = "password_reset";

/// Actions an operator takes from the console.
#[derive(Debug, Clone)]
pub struct OperatorActions {
    backends: Backends,
    aggregator: Aggregator,
}

impl OperatorActions {
    pub fn new(backends: Backends) -> Self {
        Self {
            aggregator: Aggregator::new(backends.clone()),
            backends,
        }
    }

    /// Reset a user's password on the M365 backend.
    ///
    /// The user must pick a new password at next sign-in.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<Payload, ConsoleError> {
        if email.trim().is_empty() {
            return Err(ConsoleError::InvalidInput("email is required".to_string()));
        }
        if new_password.is_empty() {
            return Err(ConsoleError::InvalidInput("password is required".to_string()));
        }

        let reset = PasswordReset::forced(email.trim(), new_password);
        let result = self
            .backends
            .get(BackendId::M365)
            .reset_password(&reset)
            .await
            .map_err(|e| ConsoleError::backend(BackendId::M365, e))?;
        info!(email = %reset.user_email, "Password reset");
        Ok(result)
    }

    /// Open a new incident on the ServiceNow backend.
    pub async fn create_incident(&self, incident: &NewIncident) -> Result<Payload, ConsoleError> {
        if incident.title.trim().is_empty() {
            return Err(ConsoleError::InvalidInput("title is required".to_string()));
        }
        let result = self
            .backends
            .get(BackendId::ServiceNow)
            .create_incident(incident)
            .await
            .map_err(|e| ConsoleError::backend(BackendId::ServiceNow, e))?;
        info!(title = %incident.title, "Incident created");
        Ok(result)
    }

    /// Approve or reject an incident without any side action.
    pub async fn decide(
        &self,
        incident: &Incident,
        decision: Decision,
    ) -> Result<Incident, ConsoleError> {
        self.aggregator
            .update_incident(
                &incident.id,
                StatusUpdate::new(decision.resulting_status()),
                Some(incident),
            )
            .await
    }

    /// Reset the incident's target user's password, then resolve it.
    ///
    /// The incident is only resolved once the reset has succeeded; a failed
    /// reset leaves it untouched.
    pub async fn approve_with_password_reset(
        &self,
        incident: &Incident,
        new_password: &str,
    ) -> Result<Incident, ConsoleError> {
        let Some(user) = incident.target_user.as_ref() else {
            return Err(ConsoleError::InvalidInput(format!(
                "incident {} has no target user",
                incident.id
            )));
        };

        self.reset_password(&user.email, new_password).await?;

        let action = ActionRequest::new(PASSWORD_RESET_ACTION, json!({ "email": user.email }));
        let update = StatusUpdate::new(Decision::Approve.resulting_status()).with_action(action);
        self.aggregator
            .update_incident(&incident.id, update, Some(incident))
            .await
    }
}
