//! CLI-specific error types

use crate::config::ConfigError;
use crate::legacy::SerializerError;
use crate::migrator::MigrationError;
use crate::vocabulary::VocabularyError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("{0} of {1} records failed to migrate")]
    MigrationFailures(usize, usize),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Serializer error: {0}")]
    SerializerError(#[from] SerializerError),

    #[error("Migration error: {0}")]
    MigrationError(#[from] MigrationError),

    #[error("Vocabulary error: {0}")]
    VocabularyError(#[from] VocabularyError),
}
