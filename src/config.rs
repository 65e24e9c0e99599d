/*!
 * Configuration types for ambkit
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AmbError, Result};
use crate::model::DEFAULT_QUERY_NETWORK;

/// Region used when neither the config nor the environment names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Upper bound for `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Client configuration shared by the admin and query APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbConfig {
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint override for the Managed Blockchain API
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Endpoint override for the Managed Blockchain Query API
    #[serde(default)]
    pub query_endpoint: Option<String>,

    /// Access key ID (when not using the default credential chain)
    #[serde(default)]
    pub access_key: Option<String>,

    /// Secret access key
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: Option<String>,

    /// Named profile from the shared AWS config files
    #[serde(default)]
    pub aws_profile: Option<String>,

    /// Per-operation timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retries on top of the first attempt, performed by the SDK
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Query network used when a caller does not name one
    #[serde(default = "default_network")]
    pub default_network: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Write JSON logs to this file instead of stdout
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Verbose logging (forces DEBUG)
    #[serde(default)]
    pub verbose: bool,
}

impl Default for AmbConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            query_endpoint: None,
            access_key: None,
            secret_key: None,
            session_token: None,
            aws_profile: None,
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            default_network: default_network(),
            log_level: LogLevel::Info,
            log_file: None,
            verbose: false,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_network() -> String {
    DEFAULT_QUERY_NETWORK.to_string()
}

impl AmbConfig {
    /// Build a configuration from the process environment
    ///
    /// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`,
    /// `AWS_REGION`, `AWS_PROFILE` and `BLOCKCHAIN_NETWORK`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Layer environment variables over the current values
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(key) = var("AWS_ACCESS_KEY_ID") {
            self.access_key = Some(key);
        }
        if let Some(secret) = var("AWS_SECRET_ACCESS_KEY") {
            self.secret_key = Some(secret);
        }
        if let Some(token) = var("AWS_SESSION_TOKEN") {
            self.session_token = Some(token);
        }
        if let Some(region) = var("AWS_REGION") {
            self.region = region;
        }
        if let Some(profile) = var("AWS_PROFILE") {
            self.aws_profile = Some(profile);
        }
        if let Some(network) = var("BLOCKCHAIN_NETWORK") {
            self.default_network = network;
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AmbError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| AmbError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AmbError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/ambkit/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ambkit").join("config.toml"))
    }

    /// Resolve the effective configuration
    ///
    /// An explicit path must exist. Without one the default path is used when
    /// present. The environment is layered on top either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(AmbError::Config(
                "Both access_key and secret_key must be provided together".to_string(),
            ));
        }

        if self.session_token.is_some() && self.access_key.is_none() {
            return Err(AmbError::Config(
                "session_token requires access_key and secret_key".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(AmbError::Config(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }

        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(AmbError::Config(format!(
                "max_retries must be at most {}",
                MAX_RETRIES_LIMIT
            )));
        }

        if !is_valid_region(&self.region) {
            return Err(AmbError::Config(format!(
                "Invalid region: {}. Expected a name like us-east-1",
                self.region
            )));
        }

        if self.default_network.trim().is_empty() {
            return Err(AmbError::Config(
                "default_network cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if using explicit credentials
    pub fn has_explicit_credentials(&self) -> bool {
        self.access_key.is_some() && self.secret_key.is_some()
    }

    /// Network to use when the caller passes none
    pub fn network_or_default(&self, network: Option<&str>) -> String {
        network
            .map(str::to_string)
            .unwrap_or_else(|| self.default_network.clone())
    }
}

/// Builder for AmbConfig
#[derive(Debug, Default)]
pub struct AmbConfigBuilder {
    config: AmbConfig,
}

impl AmbConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    /// Set the admin API endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    /// Set the query API endpoint
    pub fn query_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.query_endpoint = Some(endpoint.into());
        self
    }

    /// Set AWS credentials explicitly
    pub fn credentials(mut self, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.config.access_key = Some(access_key.into());
        self.config.secret_key = Some(secret_key.into());
        self
    }

    /// Set session token (for temporary credentials)
    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.config.session_token = Some(token.into());
        self
    }

    /// Set AWS profile name
    pub fn aws_profile(mut self, profile: impl Into<String>) -> Self {
        self.config.aws_profile = Some(profile.into());
        self
    }

    /// Set request timeout
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    /// Set maximum retry attempts
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn default_network(mut self, network: impl Into<String>) -> Self {
        self.config.default_network = network.into();
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = Some(path.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AmbConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Region names look like `us-east-1` or `us-gov-west-1`
fn is_valid_region(region: &str) -> bool {
    let parts: Vec<&str> = region.split('-').collect();
    if parts.len() < 3 {
        return false;
    }

    let (first, rest) = (parts[0], &parts[1..]);
    let Some((last, middle)) = rest.split_last() else {
        return false;
    };

    first.len() == 2
        && first.chars().all(|c| c.is_ascii_lowercase())
        && !last.is_empty()
        && last.chars().all(|c| c.is_ascii_digit())
        && middle
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AmbConfig::default();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.default_network, "ETHEREUM_MAINNET");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AmbConfig::default();
        config.apply_overrides_from(env(&[
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_REGION", "eu-west-1"),
            ("BLOCKCHAIN_NETWORK", "BITCOIN_MAINNET"),
            ("AWS_PROFILE", ""),
        ]));

        assert_eq!(config.access_key.as_deref(), Some("AKIAEXAMPLE"));
        assert_eq!(config.secret_key.as_deref(), Some("secret"));
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.default_network, "BITCOIN_MAINNET");
        assert!(config.aws_profile.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_roundtrip_and_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ambkit.toml");

        let config = AmbConfigBuilder::new()
            .region("ap-southeast-1")
            .endpoint("http://localhost:4566")
            .default_network("ETHEREUM_SEPOLIA_TESTNET")
            .log_level(LogLevel::Debug)
            .build()
            .unwrap();
        config.to_file(&path).unwrap();
        assert_eq!(AmbConfig::from_file(&path).unwrap(), config);

        std::fs::write(&path, "region = \"eu-central-1\"\n").unwrap();
        let partial = AmbConfig::from_file(&path).unwrap();
        assert_eq!(partial.region, "eu-central-1");
        assert_eq!(partial.timeout_seconds, 60);
        assert_eq!(partial.default_network, "ETHEREUM_MAINNET");
    }

    #[test]
    fn test_missing_file_is_config_file_error() {
        let dir = tempdir().unwrap();
        let err = AmbConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AmbError::ConfigFile { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        let half = AmbConfig {
            access_key: Some("AKIA".to_string()),
            ..Default::default()
        };
        assert!(half.validate().is_err());

        let token_only = AmbConfig {
            session_token: Some("token".to_string()),
            ..Default::default()
        };
        assert!(token_only.validate().is_err());

        assert!(AmbConfigBuilder::new().timeout_seconds(0).build().is_err());
        assert!(AmbConfigBuilder::new().region("useast1").build().is_err());
        assert!(AmbConfigBuilder::new().region("US-EAST-1").build().is_err());
        assert!(AmbConfigBuilder::new().default_network("  ").build().is_err());
    }

    #[test]
    fn test_region_format() {
        assert!(is_valid_region("us-east-1"));
        assert!(is_valid_region("us-gov-west-1"));
        assert!(is_valid_region("ap-southeast-2"));
        assert!(!is_valid_region("us-east"));
        assert!(!is_valid_region("us--1"));
    }

    #[test]
    fn test_network_or_default() {
        let config = AmbConfig::default();
        assert_eq!(config.network_or_default(None), "ETHEREUM_MAINNET");
        assert_eq!(
            config.network_or_default(Some("BITCOIN_TESTNET")),
            "BITCOIN_TESTNET"
        );
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
