//! Object destinations of the form `scheme://bucket/key`.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Parsed object destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    scheme: String,
    bucket: String,
    key: String,
}

impl Destination {
    /// Destination of the synthetic CSV for `dataset`: `s3://{bucket}/synth_{dataset}.csv`.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidDestination` unless `bucket` and `dataset` are
    /// single path components.
    pub fn synthetic(bucket: &str, dataset: &str) -> Result<Self, StoreError> {
        let key = format!("{}.csv", synthetic_resource_name(dataset));
        if !is_component(bucket) || !is_component(&key) {
            return Err(StoreError::InvalidDestination(format!("s3://{}/{}", bucket, key)));
        }
        Ok(Self {
            scheme: "s3".to_string(),
            bucket: bucket.to_string(),
            key,
        })
    }

    /// URL scheme, e.g. `s3`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key within the bucket, may contain `/`.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Returns `true` if `name` can be used as a single path component.
pub(crate) fn is_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\')
        && !name.chars().any(char::is_control)
}

/// Name of the synthetic resource attached to `dataset`.
pub fn synthetic_resource_name(dataset: &str) -> String {
    format!("synth_{}", dataset)
}

impl FromStr for Destination {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidDestination(s.to_string());

        let (scheme, rest) = s.split_once("://").ok_or_else(invalid)?;
        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
        if scheme.is_empty() || !is_component(bucket) || !key.split('/').all(is_component) {
            return Err(invalid());
        }

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}
