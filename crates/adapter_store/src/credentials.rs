//! Dataset store credentials.
//!
//! Loaded from a TOML file or from environment variables, then validated so
//! that every mandatory key is present and non-empty.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::CredentialsError;

/// Validated store credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    url: String,
    username: String,
    password: String,
    bucket: String,
}

/// Unvalidated credentials as they appear in a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCredentials {
    /// Store base URL
    pub url: Option<String>,
    /// Account name
    pub username: Option<String>,
    /// Account password
    pub password: Option<String>,
    /// Object bucket for synthetic outputs
    pub bucket: Option<String>,
}

impl RawCredentials {
    /// Reads `CORRSYNTH_URL`, `CORRSYNTH_USERNAME`, `CORRSYNTH_PASSWORD`
    /// and `CORRSYNTH_BUCKET`, overriding fields that are set.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var("CORRSYNTH_URL") {
            self.url = Some(url);
        }
        if let Ok(username) = std::env::var("CORRSYNTH_USERNAME") {
            self.username = Some(username);
        }
        if let Ok(password) = std::env::var("CORRSYNTH_PASSWORD") {
            self.password = Some(password);
        }
        if let Ok(bucket) = std::env::var("CORRSYNTH_BUCKET") {
            self.bucket = Some(bucket);
        }
        self
    }

    /// Checks keys in the order url, username, password, bucket.
    pub fn validate(self) -> Result<Credentials, CredentialsError> {
        fn required(value: Option<String>, key: &'static str) -> Result<String, CredentialsError> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(CredentialsError::MissingKey(key))
        }

        Ok(Credentials {
            url: required(self.url, "url")?,
            username: required(self.username, "username")?,
            password: required(self.password, "password")?,
            bucket: required(self.bucket, "bucket")?,
        })
    }
}

impl Credentials {
    /// Builds validated credentials from explicit values.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        RawCredentials {
            url: Some(url.into()),
            username: Some(username.into()),
            password: Some(password.into()),
            bucket: Some(bucket.into()),
        }
        .validate()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CredentialsError> {
        let raw: RawCredentials =
            toml::from_str(content).map_err(|e| CredentialsError::Parse(e.to_string()))?;
        raw.validate()
    }

    /// Loads a TOML file, applies environment overrides and validates.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CredentialsError::Io(e.to_string()))?;
        let raw: RawCredentials =
            toml::from_str(&content).map_err(|e| CredentialsError::Parse(e.to_string()))?;
        raw.with_env_override().validate()
    }

    /// Builds credentials from environment variables only.
    pub fn from_env() -> Result<Self, CredentialsError> {
        RawCredentials::default().with_env_override().validate()
    }

    /// Store base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Object bucket.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("bucket", &self.bucket)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_toml() {
        let creds = Credentials::from_toml_str(
            r#"
url = "https://klms.example.org"
username = "alice"
password = "s3cret"
bucket = "synthetic"
"#,
        )
        .unwrap();
        assert_eq!(creds.url(), "https://klms.example.org");
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), "s3cret");
        assert_eq!(creds.bucket(), "synthetic");
    }

    #[test]
    fn test_missing_keys_reported_in_order() {
        let err = Credentials::from_toml_str("username = \"alice\"").unwrap_err();
        assert_eq!(err, CredentialsError::MissingKey("url"));

        let err = Credentials::from_toml_str(
            "url = \"u\"\nusername = \"alice\"\npassword = \"p\"",
        )
        .unwrap_err();
        assert_eq!(err, CredentialsError::MissingKey("bucket"));
    }

    #[test]
    fn test_blank_value_is_missing() {
        let err = Credentials::new("u", "  ", "p", "b").unwrap_err();
        assert_eq!(err, CredentialsError::MissingKey("username"));
    }

    #[test]
    fn test_parse_error() {
        let err = Credentials::from_toml_str("url = ").unwrap_err();
        assert!(matches!(err, CredentialsError::Parse(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("u", "alice", "hunter2", "b").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
