//! # synth_sampler: Correlated Synthesis Engine (Layer 2)
//!
//! ## Layer 2 Role
//!
//! synth_sampler turns a numeric [`Table`](synth_core::types::Table) into a
//! synthetic table with the same column names, types and pairwise
//! correlation structure, without copying any input row:
//! - Seeded random source (`rng`)
//! - Synthesis pipeline, configuration and fidelity reporting (`sampler`)
//!
//! The engine is synchronous and performs no I/O. Cost is one `O(n³)`
//! factorisation in the column count plus one `O(samples · n²)` transform.
//!
//! ## Usage Example
//!
//! ```rust
//! use synth_core::math::CorrelationMethod;
//! use synth_core::types::{Column, Table};
//! use synth_sampler::rng::SynthRng;
//! use synth_sampler::sampler::synthesize;
//!
//! let input = Table::from_columns(vec![
//!     Column::float("height", vec![1.62, 1.75, 1.80, 1.68, 1.91]),
//!     Column::integer("weight", vec![58, 72, 80, 66, 95]),
//! ])
//! .unwrap();
//!
//! let mut rng = SynthRng::from_seed(2024);
//! let (synthetic, report) =
//!     synthesize(&input, 1_000, CorrelationMethod::Pearson, &mut rng).unwrap();
//!
//! assert_eq!(synthetic.shape(), (1_000, 2));
//! assert!(report.max_abs_deviation.is_finite());
//! ```

#![deny(missing_docs)]

pub mod rng;
pub mod sampler;
