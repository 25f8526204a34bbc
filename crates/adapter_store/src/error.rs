//! Error types for store adapters.

use synth_core::types::TableError;
use synth_sampler::sampler::SynthesisError;
use thiserror::Error;

/// Missing or malformed credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// A mandatory key is absent or empty.
    #[error("Credentials must contain '{0}' key")]
    MissingKey(&'static str),

    /// The credentials file could not be read.
    #[error("Failed to read credentials: {0}")]
    Io(String),

    /// The credentials file is not valid TOML.
    #[error("Failed to parse credentials: {0}")]
    Parse(String),
}

/// Store, catalog and publish errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset does not exist in the catalog.
    #[error("Dataset '{0}' not found")]
    DatasetNotFound(String),

    /// Dataset exists but has no resource with that name.
    #[error("Resource '{resource}' not found in dataset '{dataset}'")]
    ResourceNotFound {
        /// Dataset searched
        dataset: String,
        /// Resource name requested
        resource: String,
    },

    /// Destination is not of the form `scheme://bucket/key`.
    #[error("Invalid destination '{0}': expected scheme://bucket/key")]
    InvalidDestination(String),

    /// Dataset or resource name is unusable as a path component.
    #[error("Invalid name '{0}'")]
    InvalidName(String),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Manifest encoding or decoding failed.
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Table could not be assembled.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Synthesis failed.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Credentials are incomplete.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::ResourceNotFound {
            dataset: "stocks".to_string(),
            resource: "prices".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Resource 'prices' not found in dataset 'stocks'"
        );

        let err: StoreError = CredentialsError::MissingKey("bucket").into();
        assert_eq!(err.to_string(), "Credentials must contain 'bucket' key");
    }
}
