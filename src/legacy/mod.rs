//! Legacy JSON serializer
//!
//! Converts RDM records into the pre-RDM public API JSON shape:
//! - `record`: top-level fields (ids, files, state, owner)
//! - `metadata`: nested metadata, including grants resolved through the
//!   award and funder vocabularies
//! - `common`: metadata fields every legacy format shares
//!
//! Fields that do not resolve are omitted rather than serialized as `null`.

pub mod common;
pub mod fields;
pub mod metadata;
pub mod record;

use crate::config::Config;
use crate::vocabulary::{FunderDoiTable, ServiceRegistry, VocabularyError};
use serde_json::Value;
use tracing::info;

pub use metadata::MetadataSchema;
pub use record::LegacyState;

/// DOI prefix of legacy Zenodo DOIs
pub const DEFAULT_DOI_PREFIX: &str = "10.5281";

/// Error during legacy serialization
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Record id is not an integer: {0}")]
    InvalidRecid(String),
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// Serializer producing legacy JSON from RDM records
#[derive(Debug, Clone)]
pub struct LegacySerializer {
    registry: ServiceRegistry,
    funder_dois: FunderDoiTable,
    doi_prefix: String,
}

impl LegacySerializer {
    /// Serializer using the built-in funder DOI table and the Zenodo DOI prefix
    pub fn new(registry: ServiceRegistry) -> Self {
        Self {
            registry,
            funder_dois: FunderDoiTable::builtin(),
            doi_prefix: DEFAULT_DOI_PREFIX.to_string(),
        }
    }

    /// Serializer configured from [`Config`]
    pub fn from_config(registry: ServiceRegistry, config: &Config) -> Self {
        let mut funder_dois = FunderDoiTable::builtin();
        funder_dois.extend(config.funders.extra.clone());
        Self {
            registry,
            funder_dois,
            doi_prefix: config.legacy.doi_prefix.clone(),
        }
    }

    pub fn with_funder_dois(mut self, funder_dois: FunderDoiTable) -> Self {
        self.funder_dois = funder_dois;
        self
    }

    pub fn with_doi_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.doi_prefix = prefix.into();
        self
    }

    /// Dump one record
    pub fn dump(&self, record: &Value) -> Result<Value, SerializerError> {
        let schema = MetadataSchema::new(&self.registry, &self.funder_dois);
        record::dump_record(record, &schema, &self.doi_prefix)
    }

    /// Dump a list of records, in order
    pub fn dump_many(&self, records: &[Value]) -> Result<Vec<Value>, SerializerError> {
        let dumped = records
            .iter()
            .map(|r| self.dump(r))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Serialized {} records to legacy JSON", dumped.len());
        Ok(dumped)
    }
}
