//! View data helpers
//!
//! Data shaping behind the site's additional views: the frontpage recent
//! uploads listing and the JSON body returned for validation errors. Routing
//! and template rendering belong to the web framework.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

/// HTTP status used for validation errors
pub const VALIDATION_ERROR_STATUS: u16 = 400;

/// Error while building view data
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Search failed: {0}")]
    SearchFailed(String),
}

/// Record search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub sort: String,
    pub size: usize,
}

impl SearchParams {
    /// Newest records first
    pub fn newest(size: usize) -> Self {
        Self {
            sort: "newest".to_string(),
            size,
        }
    }
}

/// Record search service
pub trait RecordSearch {
    fn search(&self, params: &SearchParams) -> Result<Vec<Value>, ViewError>;
}

/// Serializer turning a search hit into its UI representation
pub trait RecordUiSerializer {
    fn dump_obj(&self, record: &Value) -> Value;
}

impl<F> RecordUiSerializer for F
where
    F: Fn(&Value) -> Value,
{
    fn dump_obj(&self, record: &Value) -> Value {
        self(record)
    }
}

/// Template context of the frontpage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontpageContext {
    pub template: String,
    pub show_intro_section: bool,
    pub recent_uploads: Vec<Value>,
}

/// Build the frontpage context from the most recent uploads
pub fn frontpage_context(
    search: &dyn RecordSearch,
    serializer: &dyn RecordUiSerializer,
    config: &Config,
) -> Result<FrontpageContext, ViewError> {
    let params = SearchParams::newest(config.frontpage.size);
    let hits = search.search(&params)?;
    debug!("Frontpage search returned {} records", hits.len());

    Ok(FrontpageContext {
        template: config.frontpage.template.clone(),
        show_intro_section: config.frontpage.show_intro_section,
        recent_uploads: hits.iter().map(|r| serializer.dump_obj(r)).collect(),
    })
}

/// Field -> messages, in the order schema validation reported them
pub type ValidationMessages = Map<String, Value>;

/// Error response of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub body: Value,
}

/// `{"errors": [{"field", "messages"}]}` with status 400
pub fn validation_error_body(messages: &ValidationMessages) -> ErrorResponse {
    let errors: Vec<Value> = messages
        .iter()
        .map(|(field, messages)| json!({"field": field, "messages": messages}))
        .collect();
    ErrorResponse {
        status: VALIDATION_ERROR_STATUS,
        body: json!({"errors": errors}),
    }
}

/// URL rule of the support form
pub fn support_endpoint(config: &Config) -> &str {
    config.support_endpoint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeSearch {
        hits: Vec<Value>,
        seen: RefCell<Option<SearchParams>>,
    }

    impl RecordSearch for FakeSearch {
        fn search(&self, params: &SearchParams) -> Result<Vec<Value>, ViewError> {
            *self.seen.borrow_mut() = Some(params.clone());
            Ok(self.hits.iter().take(params.size).cloned().collect())
        }
    }

    #[test]
    fn test_frontpage_context() {
        let search = FakeSearch {
            hits: vec![json!({"id": "1"}), json!({"id": "2"})],
            seen: RefCell::new(None),
        };
        let ui = |r: &Value| json!({"id": r["id"], "ui": {}});
        let config = Config::new();

        let context = frontpage_context(&search, &ui, &config).unwrap();
        assert_eq!(search.seen.borrow().clone(), Some(SearchParams::newest(10)));
        assert_eq!(context.template, "zenodo_rdm/frontpage.html");
        assert!(context.show_intro_section);
        assert_eq!(context.recent_uploads[1], json!({"id": "2", "ui": {}}));
    }

    #[test]
    fn test_validation_error_body() {
        let mut messages = ValidationMessages::new();
        messages.insert("title".to_string(), json!(["Missing data for required field."]));
        messages.insert("metadata".to_string(), json!({"creators": ["Invalid"]}));

        let response = validation_error_body(&messages);
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body,
            json!({"errors": [
                {"field": "title", "messages": ["Missing data for required field."]},
                {"field": "metadata", "messages": {"creators": ["Invalid"]}}
            ]})
        );
    }

    #[test]
    fn test_support_endpoint_default() {
        assert_eq!(support_endpoint(&Config::new()), "/support");
    }
}
