//! CLI error types.

use adapter_store::{CredentialsError, StoreError};
use synth_sampler::sampler::{ConfigError as SamplerConfigError, SynthesisError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `corrsynth` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sampler settings rejected
    #[error("Sampler configuration error: {0}")]
    Sampler(#[from] SamplerConfigError),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Store or catalog failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Credentials missing or malformed
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument combination or value rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Report encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
