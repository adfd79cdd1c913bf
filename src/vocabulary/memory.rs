//! Fixture-backed vocabulary service

use super::{AWARDS_SERVICE, FUNDERS_SERVICE, ServiceRegistry, VocabularyError, VocabularyService};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Vocabulary held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryVocabulary {
    entries: HashMap<String, Value>,
    deleted: HashSet<String>,
}

impl InMemoryVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under an identifier
    pub fn insert(&mut self, id: impl Into<String>, entry: Value) {
        self.entries.insert(id.into(), entry);
    }

    /// Mark an identifier as deleted; reads return [`VocabularyError::Deleted`]
    pub fn mark_deleted(&mut self, id: impl Into<String>) {
        self.deleted.insert(id.into());
    }

    /// Build from a list of JSON entries, each carrying an `id`.
    ///
    /// Entries flagged with `"deleted": true` are registered as deleted.
    pub fn from_entries(entries: Vec<Value>) -> Result<Self, VocabularyError> {
        let mut vocabulary = Self::new();
        for entry in entries {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| VocabularyError::InvalidEntry("entry without id".to_string()))?
                .to_string();
            if entry.get("deleted").and_then(Value::as_bool).unwrap_or(false) {
                vocabulary.mark_deleted(id);
            } else {
                vocabulary.insert(id, entry);
            }
        }
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VocabularyService for InMemoryVocabulary {
    fn read(&self, id: &str) -> Result<Value, VocabularyError> {
        if self.deleted.contains(id) {
            return Err(VocabularyError::Deleted(id.to_string()));
        }
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| VocabularyError::NotFound(id.to_string()))
    }
}

/// On-disk fixture layout: `{"awards": [...], "funders": [...]}`
#[derive(Debug, Default, Deserialize)]
struct VocabularyFixtures {
    #[serde(default)]
    awards: Vec<Value>,
    #[serde(default)]
    funders: Vec<Value>,
}

/// Build a registry with in-memory `awards` and `funders` from fixture JSON
pub fn registry_from_fixtures(json: &str) -> Result<ServiceRegistry, VocabularyError> {
    let fixtures: VocabularyFixtures = serde_json::from_str(json)
        .map_err(|e| VocabularyError::InvalidEntry(format!("Failed to parse fixtures: {}", e)))?;

    let awards = InMemoryVocabulary::from_entries(fixtures.awards)?;
    let funders = InMemoryVocabulary::from_entries(fixtures.funders)?;
    debug!(
        "Loaded vocabulary fixtures: {} awards, {} funders",
        awards.len(),
        funders.len()
    );

    Ok(ServiceRegistry::new()
        .with_service(AWARDS_SERVICE, Arc::new(awards))
        .with_service(FUNDERS_SERVICE, Arc::new(funders)))
}

/// Load a fixture file with [`registry_from_fixtures`]
pub fn registry_from_fixture_file(path: &Path) -> Result<ServiceRegistry, VocabularyError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        VocabularyError::Backend(format!("Failed to read {}: {}", path.display(), e))
    })?;
    registry_from_fixtures(&content)
}
