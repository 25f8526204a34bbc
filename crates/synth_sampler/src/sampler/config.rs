//! Synthesis configuration.
//!
//! This module provides [`SamplerConfig`], its builder and the
//! [`IntegerRounding`] policy used to restore Integer columns.

use std::fmt;
use std::str::FromStr;

use synth_core::math::CorrelationMethod;

use super::error::ConfigError;

/// Maximum number of synthetic rows per request.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Number of synthetic rows when none is requested.
pub const DEFAULT_SAMPLES: usize = 1000;

/// How generated floats are cast back into Integer columns.
///
/// The generated marginals are standard normal, so the policy decides the
/// integer distribution: `Truncate` folds (-1, 1) onto zero and shrinks the
/// spread, `Floor` shifts the mean by about -0.5, `Nearest` keeps the mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntegerRounding {
    /// Round to nearest, ties away from zero.
    #[default]
    Nearest,
    /// Round toward zero.
    Truncate,
    /// Round toward negative infinity.
    Floor,
}

impl IntegerRounding {
    /// Applies the policy.
    ///
    /// Values beyond the `i64` range saturate; NaN maps to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use synth_sampler::sampler::IntegerRounding;
    ///
    /// assert_eq!(IntegerRounding::Nearest.apply(-1.5), -2);
    /// assert_eq!(IntegerRounding::Truncate.apply(-1.7), -1);
    /// assert_eq!(IntegerRounding::Floor.apply(-1.2), -2);
    /// ```
    #[inline]
    pub fn apply(self, value: f64) -> i64 {
        let rounded = match self {
            IntegerRounding::Nearest => value.round(),
            IntegerRounding::Truncate => value.trunc(),
            IntegerRounding::Floor => value.floor(),
        };
        // `as` saturates at the i64 bounds and sends NaN to 0.
        rounded as i64
    }

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegerRounding::Nearest => "nearest",
            IntegerRounding::Truncate => "truncate",
            IntegerRounding::Floor => "floor",
        }
    }
}

impl fmt::Display for IntegerRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegerRounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(IntegerRounding::Nearest),
            "truncate" => Ok(IntegerRounding::Truncate),
            "floor" => Ok(IntegerRounding::Floor),
            other => Err(format!(
                "Unknown rounding policy: {}. Supported: nearest, truncate, floor",
                other
            )),
        }
    }
}

/// Synthesis configuration.
///
/// Use [`SamplerConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use synth_core::math::CorrelationMethod;
/// use synth_sampler::sampler::SamplerConfig;
///
/// let config = SamplerConfig::builder()
///     .sample_count(500)
///     .method(CorrelationMethod::Spearman)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.sample_count(), 500);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    sample_count: usize,
    method: CorrelationMethod,
    rounding: IntegerRounding,
    seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLES,
            method: CorrelationMethod::default(),
            rounding: IntegerRounding::default(),
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder::default()
    }

    /// Number of synthetic rows.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Correlation estimator for the target matrix.
    #[inline]
    pub fn method(&self) -> CorrelationMethod {
        self.method
    }

    /// Integer restoration policy.
    #[inline]
    pub fn rounding(&self) -> IntegerRounding {
        self.rounding
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// The free [`synthesize`](super::synthesize) accepts any row count; a
    /// configured sampler is bounded to [1, [`MAX_SAMPLES`]].
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidSampleCount` if `sample_count` is 0 or above [`MAX_SAMPLES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 || self.sample_count > MAX_SAMPLES {
            return Err(ConfigError::InvalidSampleCount(self.sample_count));
        }
        Ok(())
    }
}

/// Builder for [`SamplerConfig`].
///
/// Unset fields take their defaults: [`DEFAULT_SAMPLES`] rows, Pearson,
/// nearest rounding, entropy seed.
#[derive(Clone, Debug, Default)]
pub struct SamplerConfigBuilder {
    sample_count: Option<usize>,
    method: CorrelationMethod,
    rounding: IntegerRounding,
    seed: Option<u64>,
}

impl SamplerConfigBuilder {
    /// Sets the number of synthetic rows, in [1, 10_000_000].
    #[inline]
    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    /// Sets the correlation estimator.
    #[inline]
    pub fn method(mut self, method: CorrelationMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the Integer restoration policy.
    #[inline]
    pub fn rounding(mut self, rounding: IntegerRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidSampleCount` if the sample count is out of range.
    pub fn build(self) -> Result<SamplerConfig, ConfigError> {
        let config = SamplerConfig {
            sample_count: self.sample_count.unwrap_or(DEFAULT_SAMPLES),
            method: self.method,
            rounding: self.rounding,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
