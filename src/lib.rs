//! Zenodo RDM transforms
//!
//! Data transformation glue between Zenodo's legacy record format and the
//! Invenio RDM data model:
//! - Legacy JSON serialization of RDM records (grants resolved through the
//!   award and funder vocabularies)
//! - One-time migration of legacy records into RDM record, parent and file rows
//! - View data helpers (frontpage listing, validation error bodies)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod legacy;
pub mod migrator;
pub mod views;
pub mod vocabulary;

pub use config::{Config, ConfigError};
pub use legacy::{LegacySerializer, SerializerError};
pub use migrator::{
    LegacyEntry, MigrationError, RdmTransformResult, RecordTransform, ZenodoRecordTransform,
    transform_entry,
};
pub use views::{FrontpageContext, frontpage_context, validation_error_body};
pub use vocabulary::{
    FunderDoiTable, InMemoryVocabulary, ServiceRegistry, VocabularyError, VocabularyService,
};
#[cfg(feature = "api-backend")]
pub use vocabulary::ApiVocabulary;
