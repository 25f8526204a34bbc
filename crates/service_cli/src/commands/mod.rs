//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod import;
pub mod publish;
pub mod synthesize;

use std::path::Path;

use adapter_store::Credentials;
use clap::Args;
use synth_core::math::CorrelationMethod;
use synth_sampler::sampler::{IntegerRounding, SamplerConfig};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Sampler options shared by commands that synthesise.
#[derive(Args, Debug, Clone, Default)]
pub struct SamplerArgs {
    /// Number of synthetic rows [default: from config]
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Correlation method: pearson, spearman or kendall [default: from config]
    #[arg(short, long)]
    pub method: Option<CorrelationMethod>,

    /// Float to Integer conversion: nearest, truncate or floor [default: from config]
    #[arg(short, long)]
    pub rounding: Option<IntegerRounding>,

    /// Seed for a reproducible draw
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl SamplerArgs {
    /// Merges command-line overrides onto configured defaults.
    pub fn resolve(&self, config: &CliConfig) -> Result<SamplerConfig> {
        let defaults = &config.sampler;
        Ok(SamplerConfig::builder()
            .sample_count(self.samples.unwrap_or(defaults.samples))
            .method(self.method.unwrap_or(defaults.method))
            .rounding(self.rounding.unwrap_or(defaults.rounding))
            .maybe_seed(self.seed)
            .build()?)
    }
}

/// Credentials from `override_path`, the configured file, or the environment.
pub fn load_credentials(config: &CliConfig, override_path: Option<&Path>) -> Result<Credentials> {
    let credentials = match override_path.or(config.credentials.as_deref()) {
        Some(path) => Credentials::load(path)?,
        None => Credentials::from_env()?,
    };
    Ok(credentials)
}

/// Fails with `CliError::FileNotFound` unless `path` exists.
pub fn require_file(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_args_fall_back_to_config() {
        let mut config = CliConfig::default();
        config.sampler.samples = 42;
        config.sampler.method = CorrelationMethod::Spearman;

        let resolved = SamplerArgs::default().resolve(&config).unwrap();
        assert_eq!(resolved.sample_count(), 42);
        assert_eq!(resolved.method(), CorrelationMethod::Spearman);
        assert_eq!(resolved.rounding(), IntegerRounding::Nearest);
        assert_eq!(resolved.seed(), None);
    }

    #[test]
    fn test_sampler_args_override_config() {
        let args = SamplerArgs {
            samples: Some(7),
            method: Some(CorrelationMethod::Kendall),
            rounding: Some(IntegerRounding::Floor),
            seed: Some(99),
        };
        let resolved = args.resolve(&CliConfig::default()).unwrap();
        assert_eq!(resolved.sample_count(), 7);
        assert_eq!(resolved.method(), CorrelationMethod::Kendall);
        assert_eq!(resolved.rounding(), IntegerRounding::Floor);
        assert_eq!(resolved.seed(), Some(99));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let args = SamplerArgs {
            samples: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(&CliConfig::default()),
            Err(CliError::Sampler(_))
        ));
    }

    #[test]
    fn test_require_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(require_file(dir.path()).is_ok());
        assert!(matches!(
            require_file(&dir.path().join("missing.csv")),
            Err(CliError::FileNotFound(_))
        ));
    }
}
