//! Correlation-preserving synthetic sampler.
//!
//! The pipeline for one request:
//!
//! 1. reject tables with no columns or with non-numeric columns
//! 2. estimate the target correlation matrix with the chosen method
//! 3. factorise it (one regularised retry at most)
//! 4. draw `Z` of shape `(samples, columns)` from a standard normal
//! 5. correlate: `X = Z · Lᵗ`
//! 6. restore column names, types and, when row counts match, the row index
//! 7. report the Pearson deviation of the result from the target
//!
//! The output marginals are standard normal whatever the input's
//! distribution; only the second-moment structure is carried over.

mod config;
mod engine;
mod error;
mod fidelity;

pub use config::{
    IntegerRounding, SamplerConfig, SamplerConfigBuilder, DEFAULT_SAMPLES, MAX_SAMPLES,
};
pub use engine::{synthesize, SyntheticSampler};
pub use error::{ConfigError, SynthesisError};
pub use fidelity::{max_abs_deviation, FidelityReport};
