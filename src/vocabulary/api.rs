//! Vocabulary API backend
//!
//! Reads vocabulary entries over HTTP from `<base_url>/<vocabulary>/<id>`,
//! the shape the repository's REST API exposes for `awards` and `funders`.

use super::{VocabularyError, VocabularyService};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

/// Blocking HTTP vocabulary reader
#[derive(Debug, Clone)]
pub struct ApiVocabulary {
    client: Client,
    base_url: String,
    vocabulary: String,
}

impl ApiVocabulary {
    /// Create a reader for one vocabulary (e.g. `awards`) under `base_url`
    pub fn new(base_url: impl Into<String>, vocabulary: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, vocabulary)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        vocabulary: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            vocabulary: vocabulary.into(),
        }
    }

    /// URL an identifier is read from
    pub fn entry_url(&self, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.vocabulary,
            urlencoding::encode(id)
        )
    }
}

impl VocabularyService for ApiVocabulary {
    fn read(&self, id: &str) -> Result<Value, VocabularyError> {
        let url = self.entry_url(id);
        debug!("Reading vocabulary entry from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| VocabularyError::Backend(format!("Request to {} failed: {}", url, e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(VocabularyError::NotFound(id.to_string())),
            StatusCode::GONE => Err(VocabularyError::Deleted(id.to_string())),
            status if !status.is_success() => Err(VocabularyError::Backend(format!(
                "Unexpected status {} from {}",
                status, url
            ))),
            _ => response.json::<Value>().map_err(|e| {
                VocabularyError::InvalidEntry(format!("Invalid JSON from {}: {}", url, e))
            }),
        }
    }
}
