//! # Random Number Generation
//!
//! Synthesis draws every standard normal variate from an explicit
//! [`SynthRng`] handle instead of process-wide state, so that:
//!
//! - **Reproducibility**: the same seed and input always give the same table
//! - **Isolation**: concurrent synthesis calls each own their generator
//! - **Traceability**: unseeded runs record the entropy-derived seed, so any
//!   run can be replayed from its fidelity report
//!
//! ## Usage Example
//!
//! ```rust
//! use synth_sampler::rng::SynthRng;
//!
//! let mut rng = SynthRng::from_seed(12345);
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::SynthRng;

#[cfg(test)]
mod tests;
