//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or URL types in any signature
//! - One port instance per backend server
//! - Raw records cross the port; normalization stays in core

pub mod backend;

use std::sync::Arc;

pub use backend::{BackendError, BackendPort, BackendResult};

use crate::domain::BackendId;

/// The pair of backends the console aggregates.
///
/// Iteration order is fixed: M365 first, then ServiceNow. Every fan-out
/// concatenates results in this order.
#[derive(Clone)]
pub struct Backends {
    m365: Arc<dyn BackendPort>,
    servicenow: Arc<dyn BackendPort>,
}

impl Backends {
    /// Wire the two backends.
    pub fn new(m365: Arc<dyn BackendPort>, servicenow: Arc<dyn BackendPort>) -> Self {
        debug_assert_eq!(m365.id(), BackendId::M365, "m365 slot wired to wrong backend");
        debug_assert_eq!(
            servicenow.id(),
            BackendId::ServiceNow,
            "servicenow slot wired to wrong backend"
        );
        Self { m365, servicenow }
    }

    /// Look up the port for a backend.
    pub fn get(&self, id: BackendId) -> &Arc<dyn BackendPort> {
        match id {
            BackendId::M365 => &self.m365,
            BackendId::ServiceNow => &self.servicenow,
        }
    }

    /// Iterate ports in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn BackendPort>> {
        [&self.m365, &self.servicenow].into_iter()
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("m365", &self.m365.base_url())
            .field("servicenow", &self.servicenow.base_url())
            .finish()
    }
}
