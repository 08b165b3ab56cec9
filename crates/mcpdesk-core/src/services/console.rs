//! `Console` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (the CLI)
//! receive a `Console` and use it to access all functionality.

use super::{Aggregator, ConfigGateway, OperatorActions};
use crate::ports::Backends;

/// The core application facade.
///
/// Constructed at the adapter's composition root with one port per backend.
///
/// # Example
///
/// ```ignore
/// let backends = Backends::new(m365, servicenow);
/// let console = Console::new(backends);
///
/// let incidents = console.aggregator().list_incidents().await;
/// ```
#[derive(Debug, Clone)]
pub struct Console {
    aggregator: Aggregator,
    config: ConfigGateway,
    actions: OperatorActions,
}

impl Console {
    pub fn new(backends: Backends) -> Self {
        Self {
            aggregator: Aggregator::new(backends.clone()),
            config: ConfigGateway::new(backends.clone()),
            actions: OperatorActions::new(backends),
        }
    }

    /// Access the aggregator.
    pub const fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Access the configuration gateway.
    pub const fn config(&self) -> &ConfigGateway {
        &self.config
    }

    /// Access operator actions.
    pub const fn actions(&self) -> &OperatorActions {
        &self.actions
    }
}
