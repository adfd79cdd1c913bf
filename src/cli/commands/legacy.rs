//! Legacy serialization command

use super::load_input;
use crate::cli::error::CliError;
use crate::config::Config;
use crate::legacy::LegacySerializer;
use crate::vocabulary::ServiceRegistry;
use crate::vocabulary::memory::registry_from_fixture_file;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the legacy command
#[derive(Debug, Clone)]
pub struct LegacyArgs {
    /// RDM record JSON (object or array), file path or `-`
    pub input: String,
    /// Vocabulary fixture file with awards and funders
    pub vocabulary: Option<PathBuf>,
    /// Directory holding `.zenodo-rdm.toml`
    pub config_dir: PathBuf,
    pub pretty: bool,
}

/// Registry reading from the configured vocabulary API
#[cfg(feature = "api-backend")]
fn api_registry(config: &Config) -> Option<ServiceRegistry> {
    use crate::vocabulary::{AWARDS_SERVICE, ApiVocabulary, FUNDERS_SERVICE};
    use std::sync::Arc;

    let base_url = config.vocabulary.base_url.as_ref()?;
    info!("Using vocabulary API at {}", base_url);
    Some(
        ServiceRegistry::new()
            .with_service(
                AWARDS_SERVICE,
                Arc::new(ApiVocabulary::new(base_url.clone(), AWARDS_SERVICE)),
            )
            .with_service(
                FUNDERS_SERVICE,
                Arc::new(ApiVocabulary::new(base_url.clone(), FUNDERS_SERVICE)),
            ),
    )
}

#[cfg(not(feature = "api-backend"))]
fn api_registry(config: &Config) -> Option<ServiceRegistry> {
    if config.vocabulary.base_url.is_some() {
        warn!("Vocabulary API configured but the api-backend feature is disabled");
    }
    None
}

/// Registry from fixtures, the configured API, or empty
fn build_registry(args: &LegacyArgs, config: &Config) -> Result<ServiceRegistry, CliError> {
    if let Some(path) = &args.vocabulary {
        info!("Using vocabulary fixtures from {}", path.display());
        return Ok(registry_from_fixture_file(path)?);
    }
    if let Some(registry) = api_registry(config) {
        return Ok(registry);
    }

    warn!("No vocabulary configured, records with grants will fail to serialize");
    Ok(ServiceRegistry::new())
}

/// Handle the legacy command
pub fn handle_legacy(args: &LegacyArgs) -> Result<(), CliError> {
    let config = Config::load(&args.config_dir)?;
    let registry = build_registry(args, &config)?;
    let serializer = LegacySerializer::from_config(registry, &config);

    let content = load_input(&args.input)?;
    let input: Value =
        serde_json::from_str(&content).map_err(|e| CliError::InvalidJson(e.to_string()))?;

    let output = match &input {
        Value::Array(records) => Value::Array(serializer.dump_many(records)?),
        record => serializer.dump(record)?,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|e| CliError::InvalidJson(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
