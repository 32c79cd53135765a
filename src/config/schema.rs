//! Configuration schema for workflow runs.
//!
//! This module defines the run settings and their validation rules.

use std::time::Duration;
use thiserror::Error;

/// Errors reported by [`RunnerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("server host must not be empty")]
    EmptyHost,

    #[error("server host {0:?} must not contain whitespace")]
    InvalidHost(String),

    #[error("port must be greater than 0")]
    InvalidPort,

    #[error("unsupported scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("timeout must be greater than 0 when set")]
    InvalidTimeout,
}

/// Settings for one workflow run, built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// URL scheme used to reach the server. Defaults to "http".
    pub scheme: String,

    /// Server name or IP address.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Stop the run after the first failed step.
    ///
    /// Defaults to false: every step runs regardless of earlier failures.
    pub fail_fast: bool,

    /// Per-request timeout in seconds.
    ///
    /// `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
}

impl RunnerConfig {
    /// Creates a config for `host:port` with default settings.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: "http".to_string(),
            host: host.into(),
            port,
            fail_fast: false,
            timeout_secs: None,
        }
    }

    /// Enables or disables stop-on-first-failure, builder style.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the request timeout, builder style.
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if self.host.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.scheme != "http" && self.scheme != "https" {
            return Err(ConfigError::UnsupportedScheme(self.scheme.clone()));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    /// Base URL every step endpoint is appended to, with a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.scheme, self.host, self.port)
    }

    /// Returns the timeout as a `std::time::Duration`, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
