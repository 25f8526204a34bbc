//! Dataset catalog and tabular store abstractions.
//!
//! A catalog tracks named datasets with descriptive metadata and the
//! resources attached to them. A store moves tables in and out of it.
//! Publishing synthetic data needs both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use synth_core::types::Table;

use crate::destination::Destination;
use crate::error::StoreError;

/// Tags attached to every synthetic dataset.
pub const SYNTHETIC_TAGS: [&str; 2] = ["synthetic", "correlation"];

/// Description used when a synthetic dataset is created.
pub const SYNTHETIC_DESCRIPTION: &str = "Synthetic data generated from input data";

/// Descriptive metadata of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Human-readable title
    pub title: String,
    /// Free text description
    pub description: String,
    /// Creating user
    pub author: String,
    /// Search tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DatasetMetadata {
    /// Metadata for a synthetic dataset titled `name` created by `author`.
    pub fn synthetic(name: &str, author: &str) -> Self {
        Self {
            title: name.to_string(),
            description: SYNTHETIC_DESCRIPTION.to_string(),
            author: author.to_string(),
            tags: SYNTHETIC_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A table-valued resource attached to a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource name, unique within its dataset
    pub name: String,
    /// Object location, `scheme://bucket/key`
    pub location: String,
    /// Column holding row labels, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_column: Option<String>,
}

/// A dataset as recorded by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetHandle {
    /// Unique catalog name
    pub name: String,
    /// Descriptive metadata
    pub metadata: DatasetMetadata,
    /// Attached resources in attachment order
    #[serde(default)]
    pub resources: Vec<ResourceRef>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl DatasetHandle {
    /// Looks up a resource by name.
    ///
    /// # Errors
    ///
    /// `StoreError::ResourceNotFound` naming both the resource and the dataset.
    pub fn resource(&self, name: &str) -> Result<&ResourceRef, StoreError> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| StoreError::ResourceNotFound {
                dataset: self.name.clone(),
                resource: name.to_string(),
            })
    }
}

/// Named datasets and their resources.
pub trait DatasetCatalog {
    /// Returns the dataset named `name`, if any.
    fn find_dataset(&self, name: &str) -> Result<Option<DatasetHandle>, StoreError>;

    /// Returns the dataset named `name`, creating it with `metadata` if absent.
    ///
    /// An existing dataset keeps its metadata; missing tags are added.
    fn ensure_dataset(
        &mut self,
        name: &str,
        metadata: &DatasetMetadata,
    ) -> Result<DatasetHandle, StoreError>;

    /// Attaches (or replaces) a resource on an existing dataset.
    fn attach_resource(
        &mut self,
        dataset: &str,
        resource: ResourceRef,
    ) -> Result<DatasetHandle, StoreError>;

    /// Returns the dataset named `name`.
    ///
    /// # Errors
    ///
    /// `StoreError::DatasetNotFound` if absent.
    fn dataset(&self, name: &str) -> Result<DatasetHandle, StoreError> {
        self.find_dataset(name)?
            .ok_or_else(|| StoreError::DatasetNotFound(name.to_string()))
    }
}

/// Table storage.
pub trait DatasetStore {
    /// Reads resource `resource` of dataset `dataset` as a table.
    ///
    /// # Errors
    ///
    /// - `StoreError::DatasetNotFound` if the dataset is absent
    /// - `StoreError::ResourceNotFound` if it has no such resource
    fn fetch_table(&self, dataset: &str, resource: &str) -> Result<Table, StoreError>;

    /// Writes `table` to `destination`, replacing any previous object.
    fn store_table(&mut self, table: &Table, destination: &Destination) -> Result<(), StoreError>;
}
