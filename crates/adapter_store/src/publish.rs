//! Publishing synthetic tables into a dataset catalog.
//!
//! One flow covers both sources: a table supplied by the caller, or a
//! resource already registered in the catalog. Synthesis runs before any
//! catalog mutation, so a failed request leaves the backend untouched.

use synth_core::types::Table;
use synth_sampler::sampler::{FidelityReport, SamplerConfig, SyntheticSampler};
use tracing::{info, info_span};

use crate::catalog::{DatasetCatalog, DatasetHandle, DatasetMetadata, DatasetStore, ResourceRef};
use crate::credentials::Credentials;
use crate::csv_codec::INDEX_HEADER;
use crate::destination::{synthetic_resource_name, Destination};
use crate::error::StoreError;

/// Dataset name used when a caller-supplied table has no explicit target.
pub const DEFAULT_TARGET: &str = "synthetic_data";

/// Where the input table comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// Caller-supplied table.
    Table(Table),
    /// Resource of an existing catalog dataset.
    Resource {
        /// Dataset holding the resource
        dataset: String,
        /// Resource name
        resource: String,
    },
}

/// A publish request.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Input table
    pub source: Source,
    /// Target dataset; defaults per [`PublishRequest::target_name`]
    pub target: Option<String>,
    /// Sampler settings
    pub config: SamplerConfig,
}

impl PublishRequest {
    /// Publishes a caller-supplied table.
    pub fn from_table(table: Table, config: SamplerConfig) -> Self {
        Self {
            source: Source::Table(table),
            target: None,
            config,
        }
    }

    /// Publishes synthetic data for a catalog resource.
    pub fn from_resource(
        dataset: impl Into<String>,
        resource: impl Into<String>,
        config: SamplerConfig,
    ) -> Self {
        Self {
            source: Source::Resource {
                dataset: dataset.into(),
                resource: resource.into(),
            },
            target: None,
            config,
        }
    }

    /// Sets the target dataset name.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Target dataset name.
    ///
    /// Without an explicit target, tables go to [`DEFAULT_TARGET`] and
    /// catalog resources go back into their own dataset.
    pub fn target_name(&self) -> &str {
        match (&self.target, &self.source) {
            (Some(target), _) => target,
            (None, Source::Table(_)) => DEFAULT_TARGET,
            (None, Source::Resource { dataset, .. }) => dataset,
        }
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Synthetic table as written
    pub table: Table,
    /// Fidelity of the synthetic table
    pub report: FidelityReport,
    /// Target dataset after the resource was attached
    pub dataset: DatasetHandle,
    /// Object location of the synthetic CSV
    pub destination: Destination,
}

/// Synthesises a table and publishes it as a resource of the target dataset.
///
/// The target dataset is created with synthetic metadata authored by the
/// credentials' user if it does not exist, and reused otherwise. The table
/// is written to `s3://{bucket}/synth_{target}.csv`.
///
/// # Errors
///
/// - `StoreError::DatasetNotFound` / `StoreError::ResourceNotFound` for a
///   missing catalog source
/// - `StoreError::InvalidDestination` if the bucket or target is not a
///   single path component
/// - `StoreError::Synthesis` if the sampler rejects the input
/// - store and manifest failures while writing
pub fn publish<B>(
    backend: &mut B,
    credentials: &Credentials,
    request: PublishRequest,
) -> Result<PublishOutcome, StoreError>
where
    B: DatasetCatalog + DatasetStore,
{
    let target = request.target_name().to_string();
    let span = info_span!("publish", target = %target, user = %credentials.username());
    let _guard = span.enter();

    let destination = Destination::synthetic(credentials.bucket(), &target)?;

    let input = match request.source {
        Source::Table(table) => table,
        Source::Resource { dataset, resource } => {
            info!(dataset = %dataset, resource = %resource, "Fetching source resource");
            backend.fetch_table(&dataset, &resource)?
        }
    };

    let sampler = SyntheticSampler::new(request.config);
    let (table, report) = sampler.synthesize(&input)?;

    backend.ensure_dataset(&target, &DatasetMetadata::synthetic(&target, credentials.username()))?;

    backend.store_table(&table, &destination)?;
    let dataset = backend.attach_resource(
        &target,
        ResourceRef {
            name: synthetic_resource_name(&target),
            location: destination.to_string(),
            index_column: Some(INDEX_HEADER.to_string()),
        },
    )?;

    info!(
        destination = %destination,
        rows = table.n_rows(),
        max_abs_deviation = report.max_abs_deviation,
        "Published synthetic data"
    );

    Ok(PublishOutcome {
        table,
        report,
        dataset,
        destination,
    })
}
