//! Configuration Module
//!
//! Environment-driven settings for the console.

use std::path::PathBuf;
use std::time::Duration;

/// Fallback API address when `ADMIN_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

pub const ENV_API_URL: &str = "ADMIN_API_URL";
pub const ENV_DEMO_LOGIN: &str = "ADMIN_DEMO_LOGIN";
pub const ENV_STORAGE_DIR: &str = "ADMIN_STORAGE_DIR";
pub const ENV_REQUEST_TIMEOUT: &str = "ADMIN_REQUEST_TIMEOUT_SECS";

/// Console settings resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    /// Enables the demo login fallback and signal-based session recovery
    pub demo_login: bool,
    /// Overrides the persisted-state directory
    pub storage_dir: Option<PathBuf>,
    /// `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
}

impl ConsoleConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_API_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let demo_login = lookup(ENV_DEMO_LOGIN)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let storage_dir = lookup(ENV_STORAGE_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let request_timeout = lookup(ENV_REQUEST_TIMEOUT)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            api_base_url,
            demo_login,
            storage_dir,
            request_timeout,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
