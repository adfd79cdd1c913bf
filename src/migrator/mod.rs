//! Legacy Zenodo -> RDM migration transforms
//!
//! Converts rows of the legacy records table into the RDM data model:
//! - `record`: the published record row (pids, access, metadata)
//! - `parent`: the version-independent parent (concept id, owners, communities)
//! - `files`: record file rows
//!
//! Drafts are not part of the legacy export and are never produced.

pub mod models;
pub mod names;
pub mod record;
pub mod stream;
pub mod transform;

pub use models::{LegacyEntry, RdmTransformResult};
pub use names::HumanName;
pub use record::{RecordEntryTransform, ZenodoRecordEntry};
pub use stream::StreamReport;
pub use transform::{RecordTransform, ZenodoRecordTransform};

/// Error during migration
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

/// Transform a single legacy entry given as JSON
pub fn transform_entry(entry: &serde_json::Value) -> Result<RdmTransformResult, MigrationError> {
    let entry: LegacyEntry = serde_json::from_value(entry.clone())
        .map_err(|e| MigrationError::ParseError(e.to_string()))?;
    ZenodoRecordTransform::new().transform(&entry)
}
