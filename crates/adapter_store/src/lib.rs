//! # Adapter Store
//!
//! Layer 3 (Adapters) of corrsynth: moves tables between files, a dataset
//! catalog and the sampler.
//!
//! ## Modules
//!
//! - [`csv_codec`]: CSV reading with column type inference, CSV writing
//! - [`catalog`]: [`DatasetCatalog`] and [`DatasetStore`] abstractions
//! - [`local`]: [`LocalStore`], a directory-backed implementation of both
//! - [`credentials`]: validated store credentials
//! - [`destination`]: `scheme://bucket/key` object locations
//! - [`publish`]: synthesise-and-publish flow
//!
//! ## Example
//!
//! ```no_run
//! use adapter_store::{publish, Credentials, LocalStore, PublishRequest};
//! use synth_sampler::sampler::SamplerConfig;
//!
//! let mut store = LocalStore::open("/tmp/corrsynth").unwrap();
//! let credentials = Credentials::new("file:///tmp/corrsynth", "alice", "secret", "lake").unwrap();
//! let config = SamplerConfig::builder().sample_count(500).build().unwrap();
//!
//! let request = PublishRequest::from_resource("stocks", "prices", config);
//! let outcome = publish(&mut store, &credentials, request).unwrap();
//! println!("{}: {}", outcome.destination, outcome.report);
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod credentials;
pub mod csv_codec;
pub mod destination;
pub mod error;
pub mod local;
pub mod publish;

pub use catalog::{DatasetCatalog, DatasetHandle, DatasetMetadata, DatasetStore, ResourceRef};
pub use credentials::Credentials;
pub use destination::Destination;
pub use error::{CredentialsError, StoreError};
pub use local::LocalStore;
pub use publish::{publish, PublishOutcome, PublishRequest, Source, DEFAULT_TARGET};
