//! Import command implementation
//!
//! Registers a local CSV file as a resource of a dataset in the local store,
//! so that `publish --dataset` can later source from it.

use std::path::Path;

use adapter_store::csv_codec::{read_table_path, ReadOptions};
use adapter_store::{DatasetCatalog, DatasetMetadata, LocalStore, ResourceRef};
use tracing::info;

use super::{load_credentials, require_file};
use crate::config::CliConfig;
use crate::Result;

/// Run the import command
pub fn run(
    config: &CliConfig,
    input: &Path,
    index_col: Option<&str>,
    dataset: &str,
    resource: &str,
    credentials_path: Option<&Path>,
) -> Result<ResourceRef> {
    require_file(input)?;
    let credentials = load_credentials(config, credentials_path)?;
    let mut store = LocalStore::open(&config.store_root)?;

    let options = ReadOptions {
        index_column: index_col.map(str::to_string),
    };
    let table = read_table_path(input, &options)?;

    store.ensure_dataset(
        dataset,
        &DatasetMetadata {
            title: dataset.to_string(),
            description: format!("Imported from {}", input.display()),
            author: credentials.username().to_string(),
            tags: Vec::new(),
        },
    )?;
    let reference = store.put_resource(dataset, resource, credentials.bucket(), &table)?;

    info!(
        dataset,
        resource,
        rows = table.n_rows(),
        columns = table.n_columns(),
        "Imported resource"
    );
    println!("{}/{} -> {}", dataset, resource, reference.location);
    Ok(reference)
}
