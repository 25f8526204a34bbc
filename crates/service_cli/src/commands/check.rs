//! Check command implementation
//!
//! Validates configuration, credentials and the local store, reporting each
//! item and failing if any is unusable.

use std::path::Path;

use adapter_store::LocalStore;
use tracing::{info, warn};

use super::load_credentials;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    /// What was checked
    pub name: &'static str,
    /// `None` on success, otherwise the failure
    pub problem: Option<String>,
}

impl CheckItem {
    fn from_result<T, E: std::fmt::Display>(
        name: &'static str,
        result: std::result::Result<T, E>,
    ) -> Self {
        Self {
            name,
            problem: result.err().map(|e| e.to_string()),
        }
    }
}

/// Runs every check without stopping at the first failure.
pub fn checks(config: &CliConfig, credentials_path: Option<&Path>) -> Vec<CheckItem> {
    vec![
        CheckItem::from_result("configuration", config.validate()),
        CheckItem::from_result("credentials", load_credentials(config, credentials_path)),
        CheckItem::from_result("store", LocalStore::open(&config.store_root)),
    ]
}

/// Run the check command
pub fn run(config: &CliConfig, credentials_path: Option<&Path>) -> Result<()> {
    info!("Checking corrsynth setup...");
    println!("store_root : {}", config.store_root.display());
    println!("log_level  : {}", config.log_level);
    println!(
        "sampler    : {} samples, {} method, {} rounding",
        config.sampler.samples, config.sampler.method, config.sampler.rounding
    );

    let items = checks(config, credentials_path);
    let mut failed = Vec::new();
    for item in &items {
        match &item.problem {
            None => println!("[ok]   {}", item.name),
            Some(problem) => {
                warn!(check = item.name, %problem, "Check failed");
                println!("[fail] {}: {}", item.name, problem);
                failed.push(item.name);
            }
        }
    }

    if failed.is_empty() {
        info!("All checks passed");
        Ok(())
    } else {
        Err(CliError::InvalidArgument(format!(
            "Checks failed: {}",
            failed.join(", ")
        )))
    }
}
