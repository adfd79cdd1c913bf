//! Configuration file support
//!
//! Handles parsing of `.zenodo-rdm.toml` configuration files and
//! environment variable overrides.

use crate::legacy::DEFAULT_DOI_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".zenodo-rdm.toml";

/// Environment variable for the legacy DOI prefix
pub const ENV_DOI_PREFIX: &str = "ZENODO_RDM_DOI_PREFIX";

/// Environment variable for the vocabulary API base URL
pub const ENV_VOCABULARY_URL: &str = "ZENODO_RDM_VOCABULARY_URL";

/// Environment variable for the support endpoint
pub const ENV_SUPPORT_ENDPOINT: &str = "ZENODO_RDM_SUPPORT_ENDPOINT";

/// Default frontpage template
pub const DEFAULT_FRONTPAGE_TEMPLATE: &str = "zenodo_rdm/frontpage.html";

/// Default number of recent uploads on the frontpage
pub const DEFAULT_FRONTPAGE_SIZE: usize = 10;

/// Default support URL rule
pub const DEFAULT_SUPPORT_ENDPOINT: &str = "/support";

/// Error loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializationError(String),
}

/// Legacy serializer section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacySection {
    /// DOI prefix used for pre-reserved DOIs
    #[serde(default = "default_doi_prefix")]
    pub doi_prefix: String,
}

fn default_doi_prefix() -> String {
    DEFAULT_DOI_PREFIX.to_string()
}

impl Default for LegacySection {
    fn default() -> Self {
        Self {
            doi_prefix: default_doi_prefix(),
        }
    }
}

/// Funder DOI table additions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundersSection {
    /// ROR id -> funder DOI, merged over the built-in table
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// Vocabulary backend section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularySection {
    /// Base URL of the vocabulary API (e.g. "https://zenodo.org/api")
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Frontpage section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontpageSection {
    #[serde(default = "default_frontpage_template")]
    pub template: String,

    #[serde(default = "default_true")]
    pub show_intro_section: bool,

    /// Number of recent uploads listed
    #[serde(default = "default_frontpage_size")]
    pub size: usize,
}

fn default_frontpage_template() -> String {
    DEFAULT_FRONTPAGE_TEMPLATE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_frontpage_size() -> usize {
    DEFAULT_FRONTPAGE_SIZE
}

impl Default for FrontpageSection {
    fn default() -> Self {
        Self {
            template: default_frontpage_template(),
            show_intro_section: true,
            size: DEFAULT_FRONTPAGE_SIZE,
        }
    }
}

/// Support form section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportSection {
    /// URL rule of the support form; empty means the default
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Main configuration structure
///
/// Represents the `.zenodo-rdm.toml` configuration file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub legacy: LegacySection,

    #[serde(default)]
    pub funders: FundersSection,

    #[serde(default)]
    pub vocabulary: VocabularySection,

    #[serde(default)]
    pub frontpage: FrontpageSection,

    #[serde(default)]
    pub support: SupportSection,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.zenodo-rdm.toml` in `dir`, falling back to defaults.
    /// Environment overrides are applied either way.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(prefix) = std::env::var(ENV_DOI_PREFIX)
            && !prefix.is_empty()
        {
            self.legacy.doi_prefix = prefix;
        }

        if let Ok(url) = std::env::var(ENV_VOCABULARY_URL) {
            self.vocabulary.base_url = Some(url);
        }

        if let Ok(endpoint) = std::env::var(ENV_SUPPORT_ENDPOINT) {
            self.support.endpoint = Some(endpoint);
        }
    }

    /// Support URL rule, `/support` unless configured
    pub fn support_endpoint(&self) -> &str {
        self.support
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_SUPPORT_ENDPOINT)
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Zenodo RDM transforms configuration

[legacy]
# Prefix of pre-reserved DOIs in legacy JSON
doi_prefix = "10.5281"

# Extra ROR id -> funder DOI pairs for grant identifiers
[funders.extra]
# "00k4n6c32" = "10.13039/501100000780"

[vocabulary]
# base_url = "https://zenodo.org/api"

[frontpage]
template = "zenodo_rdm/frontpage.html"
show_intro_section = true
size = 10

[support]
# endpoint = "/support"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.legacy.doi_prefix, "10.5281");
        assert!(config.funders.extra.is_empty());
        assert_eq!(config.frontpage.size, 10);
        assert!(config.frontpage.show_intro_section);
        assert_eq!(config.support_endpoint(), "/support");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[legacy]
doi_prefix = "10.1234"

[funders.extra]
"05abc1234" = "10.13039/999"

[frontpage]
size = 5
show_intro_section = false

[support]
endpoint = "/help"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.legacy.doi_prefix, "10.1234");
        assert_eq!(
            config.funders.extra.get("05abc1234"),
            Some(&"10.13039/999".to_string())
        );
        assert_eq!(config.frontpage.size, 5);
        assert_eq!(config.frontpage.template, DEFAULT_FRONTPAGE_TEMPLATE);
        assert!(!config.frontpage.show_intro_section);
        assert_eq!(config.support_endpoint(), "/help");
    }

    #[test]
    fn test_empty_support_endpoint_falls_back() {
        let config = Config::parse("[support]\nendpoint = \"\"\n").unwrap();
        assert_eq!(config.support_endpoint(), "/support");
    }

    #[test]
    fn test_sample_config_parses() {
        let config = Config::parse(sample_config()).unwrap();
        assert_eq!(config.legacy.doi_prefix, "10.5281");
    }

    #[test]
    fn test_load_and_round_trip() {
        let dir = tempdir().unwrap();
        let mut config = Config::new();
        config.frontpage.size = 3;
        std::fs::write(dir.path().join(CONFIG_FILENAME), config.to_toml().unwrap()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.frontpage.size, 3);
    }
}
