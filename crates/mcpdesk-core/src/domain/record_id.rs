//! Composite record identifiers.
//!
//! Incidents and activities from different backends share one list, so their
//! ids are qualified with the originating backend: `<source>-<local_id>`.
//! The pair is parsed once and carried as a typed value afterwards.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::BackendId;

/// Errors produced when parsing a composite record id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIdError {
    /// The prefix does not name a known backend.
    #[error("Unknown record source: {0}")]
    UnknownSource(String),

    /// The id has no `-` separator or an empty local part.
    #[error("Malformed record id: {0}")]
    Malformed(String),
}

/// A record id qualified by its originating backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    source: BackendId,
    local_id: String,
}

impl RecordId {
    /// Build a record id from its parts.
    pub fn new(source: BackendId, local_id: impl Into<String>) -> Self {
        Self {
            source,
            local_id: local_id.into(),
        }
    }

    /// The backend the record came from.
    pub const fn source(&self) -> BackendId {
        self.source
    }

    /// The id as known to the backend itself.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Parse `<source>-<local_id>`, splitting on the first `-` only.
    ///
    /// Local ids may themselves contain `-`.
    pub fn parse(s: &str) -> Result<Self, RecordIdError> {
        let Some((prefix, local)) = s.split_once('-') else {
            return match BackendId::parse(s) {
                Some(_) => Err(RecordIdError::Malformed(s.to_string())),
                None => Err(RecordIdError::UnknownSource(s.to_string())),
            };
        };

        let source = BackendId::parse(prefix)
            .ok_or_else(|| RecordIdError::UnknownSource(prefix.to_string()))?;

        if local.is_empty() {
            return Err(RecordIdError::Malformed(s.to_string()));
        }

        Ok(Self::new(source, local))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.local_id)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
