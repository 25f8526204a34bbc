//! CLI configuration.
//!
//! Loaded from `corrsynth.toml` when present, then overridden by
//! `CORRSYNTH_*` environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use synth_core::math::CorrelationMethod;
use synth_sampler::sampler::{IntegerRounding, DEFAULT_SAMPLES, MAX_SAMPLES};

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Root directory of the local dataset store
    #[serde(default = "default_store_root")]
    pub store_root: PathBuf,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Credentials file; environment variables are used when absent
    #[serde(default)]
    pub credentials: Option<PathBuf>,

    /// Sampler defaults for commands that do not override them
    #[serde(default)]
    pub sampler: SamplerDefaults,
}

/// Sampler defaults
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SamplerDefaults {
    /// Rows to generate
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Correlation estimator
    #[serde(default)]
    pub method: CorrelationMethod,

    /// Float to Integer conversion policy
    #[serde(default)]
    pub rounding: IntegerRounding,
}

fn default_store_root() -> PathBuf {
    PathBuf::from(".corrsynth")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

impl Default for SamplerDefaults {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            method: CorrelationMethod::default(),
            rounding: IntegerRounding::default(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_root: default_store_root(),
            log_level: default_log_level(),
            credentials: None,
            sampler: SamplerDefaults::default(),
        }
    }
}

impl CliConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if it exists, otherwise starts from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies environment variable overrides.
    ///
    /// Every unparseable value is reported, not just the first.
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();

        if let Ok(store_root) = std::env::var("CORRSYNTH_STORE_ROOT") {
            self.store_root = PathBuf::from(store_root);
        }

        if let Ok(log_level) = std::env::var("CORRSYNTH_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(credentials) = std::env::var("CORRSYNTH_CREDENTIALS") {
            self.credentials = Some(PathBuf::from(credentials));
        }

        if let Ok(samples) = std::env::var("CORRSYNTH_SAMPLES") {
            match samples.parse() {
                Ok(n) => self.sampler.samples = n,
                Err(_) => errors.push(format!("CORRSYNTH_SAMPLES '{}' is not a count", samples)),
            }
        }

        if let Ok(method) = std::env::var("CORRSYNTH_METHOD") {
            match method.parse() {
                Ok(m) => self.sampler.method = m,
                Err(e) => errors.push(e),
            }
        }

        if let Ok(rounding) = std::env::var("CORRSYNTH_ROUNDING") {
            match rounding.parse() {
                Ok(r) => self.sampler.rounding = r,
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validates the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.store_root.as_os_str().is_empty() {
            errors.push("store_root cannot be empty".to_string());
        }

        if self.sampler.samples == 0 || self.sampler.samples > MAX_SAMPLES {
            errors.push(format!(
                "sampler.samples {} must be in [1, {}]",
                self.sampler.samples, MAX_SAMPLES
            ));
        }

        if let Some(path) = &self.credentials {
            if path.as_os_str().is_empty() {
                errors.push("credentials path cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Loads (or defaults), applies environment overrides and validates.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more invalid values
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = CliConfig::default();
        assert_eq!(config.sampler.samples, 1000);
        assert_eq!(config.sampler.method, CorrelationMethod::Pearson);
        assert_eq!(config.sampler.rounding, IntegerRounding::Nearest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_document() {
        let config = CliConfig::from_toml_str(
            r#"
store_root = "/var/lib/corrsynth"
log_level = "debug"
credentials = "creds.toml"

[sampler]
samples = 250
method = "kendall"
rounding = "truncate"
"#,
        )
        .unwrap();

        assert_eq!(config.store_root, PathBuf::from("/var/lib/corrsynth"));
        assert_eq!(config.credentials, Some(PathBuf::from("creds.toml")));
        assert_eq!(config.sampler.samples, 250);
        assert_eq!(config.sampler.method, CorrelationMethod::Kendall);
        assert_eq!(config.sampler.rounding, IntegerRounding::Truncate);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = CliConfig::from_toml_str("sample_count = 5");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();
        config.store_root = PathBuf::new();
        config.sampler.samples = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("log_level"));
                assert!(errors[1].contains("store_root"));
                assert!(errors[2].contains("sampler.samples"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrsynth.toml");
        std::fs::write(&path, "log_level = \"warn\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.sampler, SamplerDefaults::default());
    }
}
