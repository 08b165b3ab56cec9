//! Fan-out results with per-backend failure isolation.

use serde::Serialize;
use tracing::warn;

use crate::domain::BackendId;
use crate::ports::{BackendError, BackendResult};

/// One backend's failure during a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub backend: BackendId,
    pub error: BackendError,
}

/// How much of the requested data actually arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    /// Every backend answered.
    Complete,
    /// Some backends failed; their data is missing.
    Partial,
    /// No backend answered.
    Unavailable,
}

/// Concatenated records from all backends plus the failures encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated<T> {
    pub items: Vec<T>,
    pub failures: Vec<BackendFailure>,
}

impl<T> Aggregated<T> {
    /// Combine per-backend results in the order given.
    ///
    /// Failed backends contribute no items and are logged.
    pub(crate) fn from_results(
        what: &'static str,
        results: impl IntoIterator<Item = (BackendId, BackendResult<Vec<T>>)>,
    ) -> Self {
        let mut items = Vec::new();
        let mut failures = Vec::new();
        for (backend, result) in results {
            match result {
                Ok(mut batch) => items.append(&mut batch),
                Err(error) => {
                    warn!(%backend, error = %error, "Failed to fetch {what}; continuing without them");
                    failures.push(BackendFailure { backend, error });
                }
            }
        }
        Self { items, failures }
    }

    pub fn coverage(&self) -> Coverage {
        coverage_of(&self.failures)
    }

    /// Backends whose data is missing.
    pub fn failed_backends(&self) -> Vec<BackendId> {
        self.failures.iter().map(|f| f.backend).collect()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Coverage implied by a set of failures across all known backends.
fn coverage_of(failures: &[BackendFailure]) -> Coverage {
    let failed = BackendId::ALL
        .iter()
        .filter(|id| failures.iter().any(|f| f.backend == **id))
        .count();
    match failed {
        0 => Coverage::Complete,
        n if n == BackendId::ALL.len() => Coverage::Unavailable,
        _ => Coverage::Partial,
    }
}
