//! Filesystem-backed catalog and store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/datasets/<name>/dataset.json
//! <root>/objects/<bucket>/<key>
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use synth_core::types::Table;
use tracing::{debug, info};

use crate::catalog::{DatasetCatalog, DatasetHandle, DatasetMetadata, DatasetStore, ResourceRef};
use crate::csv_codec::{read_table_path, write_table_path, ReadOptions, INDEX_HEADER};
use crate::destination::{is_component, Destination};
use crate::error::StoreError;

const MANIFEST_FILE: &str = "dataset.json";

/// Catalog and object store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Opens (creating if necessary) a store at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join("datasets"))?;
        fs::create_dir_all(root.join("objects"))?;
        debug!(root = %root.display(), "Opened local store");
        Ok(Self { root })
    }

    /// Filesystem path of an object.
    pub fn object_path(&self, location: &Destination) -> PathBuf {
        let mut path = self.root.join("objects").join(location.bucket());
        for part in location.key().split('/') {
            path.push(part);
        }
        path
    }

    /// Stores `table` as a resource of an existing dataset.
    ///
    /// The object is written to `s3://{bucket}/{dataset}/{resource}.csv`.
    pub fn put_resource(
        &mut self,
        dataset: &str,
        resource: &str,
        bucket: &str,
        table: &Table,
    ) -> Result<ResourceRef, StoreError> {
        check_name(dataset)?;
        check_name(resource)?;
        let location: Destination = format!("s3://{}/{}/{}.csv", bucket, dataset, resource).parse()?;
        self.store_table(table, &location)?;

        let reference = ResourceRef {
            name: resource.to_string(),
            location: location.to_string(),
            index_column: Some(INDEX_HEADER.to_string()),
        };
        self.attach_resource(dataset, reference.clone())?;
        Ok(reference)
    }

    fn manifest_path(&self, name: &str) -> PathBuf {
        self.root.join("datasets").join(name).join(MANIFEST_FILE)
    }

    fn save(&self, handle: &DatasetHandle) -> Result<(), StoreError> {
        let path = self.manifest_path(&handle.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(handle)?;
        fs::write(&path, json)?;
        Ok(())
    }
}

impl DatasetCatalog for LocalStore {
    fn find_dataset(&self, name: &str) -> Result<Option<DatasetHandle>, StoreError> {
        check_name(name)?;
        let path = self.manifest_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn ensure_dataset(
        &mut self,
        name: &str,
        metadata: &DatasetMetadata,
    ) -> Result<DatasetHandle, StoreError> {
        if let Some(mut handle) = self.find_dataset(name)? {
            info!(dataset = %name, "Dataset already exists, reusing it");
            let missing: Vec<String> = metadata
                .tags
                .iter()
                .filter(|t| !handle.metadata.tags.contains(t))
                .cloned()
                .collect();
            if !missing.is_empty() {
                handle.metadata.tags.extend(missing);
                handle.updated_at = Utc::now();
                self.save(&handle)?;
            }
            return Ok(handle);
        }

        let now = Utc::now();
        let handle = DatasetHandle {
            name: name.to_string(),
            metadata: metadata.clone(),
            resources: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.save(&handle)?;
        info!(dataset = %name, author = %metadata.author, "Created dataset");
        Ok(handle)
    }

    fn attach_resource(
        &mut self,
        dataset: &str,
        resource: ResourceRef,
    ) -> Result<DatasetHandle, StoreError> {
        let mut handle = self.dataset(dataset)?;
        match handle.resources.iter_mut().find(|r| r.name == resource.name) {
            Some(existing) => *existing = resource,
            None => handle.resources.push(resource),
        }
        handle.updated_at = Utc::now();
        self.save(&handle)?;
        Ok(handle)
    }
}

impl DatasetStore for LocalStore {
    fn fetch_table(&self, dataset: &str, resource: &str) -> Result<Table, StoreError> {
        let handle = self.dataset(dataset)?;
        let reference = handle.resource(resource)?;
        let location: Destination = reference.location.parse()?;
        let options = ReadOptions {
            index_column: reference.index_column.clone(),
        };
        read_table_path(&self.object_path(&location), &options)
    }

    fn store_table(&mut self, table: &Table, destination: &Destination) -> Result<(), StoreError> {
        let path = self.object_path(destination);
        write_table_path(&path, table)?;
        debug!(location = %destination, rows = table.n_rows(), "Wrote object");
        Ok(())
    }
}

/// Rejects names that cannot be a single path component.
fn check_name(name: &str) -> Result<(), StoreError> {
    if is_component(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}
