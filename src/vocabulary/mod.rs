//! Vocabulary services
//!
//! Awards and funders are vocabulary entities the legacy serializer resolves
//! grants through. Services are looked up by name in a [`ServiceRegistry`],
//! mirroring how the repository platform exposes its record services:
//! - `awards`: grant records (number, title, linked funder)
//! - `funders`: funding organisations, identified by ROR id
//!
//! Backends:
//! - [`InMemoryVocabulary`]: fixture-backed, used by tests and the CLI
//! - [`ApiVocabulary`]: blocking HTTP reads against a vocabulary API

#[cfg(feature = "api-backend")]
pub mod api;
pub mod funders;
pub mod memory;
pub mod models;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "api-backend")]
pub use api::ApiVocabulary;
pub use funders::FunderDoiTable;
pub use memory::InMemoryVocabulary;
pub use models::{Award, Funder, FunderRef};

/// Registry name of the awards service
pub const AWARDS_SERVICE: &str = "awards";

/// Registry name of the funders service
pub const FUNDERS_SERVICE: &str = "funders";

/// Error during a vocabulary read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("Vocabulary entry does not exist: {0}")]
    NotFound(String),
    #[error("Vocabulary entry has been deleted: {0}")]
    Deleted(String),
    #[error("Service not registered: {0}")]
    ServiceNotRegistered(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Invalid vocabulary entry: {0}")]
    InvalidEntry(String),
}

impl VocabularyError {
    /// Whether the error means the identifier no longer (or never) resolves.
    ///
    /// The legacy serializer treats these as "unsupported in the legacy API"
    /// rather than as failures.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, VocabularyError::NotFound(_) | VocabularyError::Deleted(_))
    }
}

/// Read access to a single vocabulary
pub trait VocabularyService: Send + Sync {
    /// Read one entry by identifier, returning its JSON representation
    fn read(&self, id: &str) -> Result<Value, VocabularyError>;
}

/// Named vocabulary services
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn VocabularyService>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under a name, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, service: Arc<dyn VocabularyService>) {
        self.services.insert(name.into(), service);
    }

    /// Builder-style variant of [`ServiceRegistry::register`]
    pub fn with_service(
        mut self,
        name: impl Into<String>,
        service: Arc<dyn VocabularyService>,
    ) -> Self {
        self.register(name, service);
        self
    }

    /// Look up a service by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn VocabularyService>, VocabularyError> {
        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| VocabularyError::ServiceNotRegistered(name.to_string()))
    }

    /// Read an award through the `awards` service
    pub fn read_award(&self, id: &str) -> Result<Award, VocabularyError> {
        let value = self.get(AWARDS_SERVICE)?.read(id)?;
        serde_json::from_value(value)
            .map_err(|e| VocabularyError::InvalidEntry(format!("award {}: {}", id, e)))
    }

    /// Read a funder through the `funders` service
    pub fn read_funder(&self, id: &str) -> Result<Funder, VocabularyError> {
        let value = self.get(FUNDERS_SERVICE)?.read(id)?;
        serde_json::from_value(value)
            .map_err(|e| VocabularyError::InvalidEntry(format!("funder {}: {}", id, e)))
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.services.keys().collect();
        names.sort();
        f.debug_struct("ServiceRegistry")
            .field("services", &names)
            .finish()
    }
}
