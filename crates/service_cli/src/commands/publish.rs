//! Publish command implementation
//!
//! Synthesises a table from a local CSV file or a catalog resource and
//! publishes it into the local dataset store.

use std::path::Path;

use adapter_store::csv_codec::{read_table_path, ReadOptions};
use adapter_store::{publish, LocalStore, PublishOutcome, PublishRequest};
use tracing::info;

use super::{load_credentials, require_file, SamplerArgs};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Where the publish input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishSource<'a> {
    /// Local CSV file with an optional index column
    File {
        /// CSV path
        path: &'a Path,
        /// Column holding row labels
        index_col: Option<&'a str>,
    },
    /// Resource of a dataset in the store
    Resource {
        /// Dataset name
        dataset: &'a str,
        /// Resource name
        resource: &'a str,
    },
}

impl<'a> PublishSource<'a> {
    /// Builds the source from mutually exclusive command-line options.
    pub fn from_args(
        input: Option<&'a Path>,
        index_col: Option<&'a str>,
        dataset: Option<&'a str>,
        resource: Option<&'a str>,
    ) -> Result<Self> {
        match (input, dataset, resource) {
            (Some(path), None, None) => Ok(Self::File { path, index_col }),
            (None, Some(dataset), Some(resource)) => Ok(Self::Resource { dataset, resource }),
            (None, Some(_), None) => Err(CliError::InvalidArgument(
                "--dataset requires --resource".to_string(),
            )),
            (None, None, _) => Err(CliError::InvalidArgument(
                "Either --input or --dataset/--resource is required".to_string(),
            )),
            (Some(_), _, _) => Err(CliError::InvalidArgument(
                "--input cannot be combined with --dataset/--resource".to_string(),
            )),
        }
    }
}

/// Run the publish command
pub fn run(
    config: &CliConfig,
    source: PublishSource<'_>,
    target: Option<&str>,
    sampler: &SamplerArgs,
    credentials_path: Option<&Path>,
) -> Result<PublishOutcome> {
    let sampler_config = sampler.resolve(config)?;
    let credentials = load_credentials(config, credentials_path)?;
    let mut store = LocalStore::open(&config.store_root)?;

    let request = match source {
        PublishSource::File { path, index_col } => {
            require_file(path)?;
            let options = ReadOptions {
                index_column: index_col.map(str::to_string),
            };
            PublishRequest::from_table(read_table_path(path, &options)?, sampler_config)
        }
        PublishSource::Resource { dataset, resource } => {
            PublishRequest::from_resource(dataset, resource, sampler_config)
        }
    };
    let request = match target {
        Some(target) => request.with_target(target),
        None => request,
    };

    let outcome = publish(&mut store, &credentials, request)?;
    info!(
        dataset = %outcome.dataset.name,
        destination = %outcome.destination,
        "Publish complete"
    );
    println!("{} -> {}", outcome.dataset.name, outcome.destination);
    println!("{}", outcome.report);
    Ok(outcome)
}
