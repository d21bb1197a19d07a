//! Configuration module

use std::env;

pub const SERVER_URL_VAR: &str = "CEREBROVA_SERVER_URL";
pub const TIMEOUT_VAR: &str = "CEREBROVA_TIMEOUT_SECS";
pub const FRAME_VAR: &str = "CEREBROVA_FRAME_MS";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the prediction service
    pub server_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Interval between animation frames in the terminal UI
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            frame_interval_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            server_url: lookup(SERVER_URL_VAR)
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.server_url),

            timeout_secs: lookup(TIMEOUT_VAR)
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(defaults.timeout_secs),

            frame_interval_ms: lookup(FRAME_VAR)
                .and_then(|f| f.parse().ok())
                .filter(|f| *f > 0)
                .unwrap_or(defaults.frame_interval_ms),
        }
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
