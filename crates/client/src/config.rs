//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SERVEREST_BASE_URL` - Root URL of the API (default: `http://localhost:3000`)
//! - `SERVEREST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SERVEREST_FIXTURES_DIR` - Directory holding fixture JSON files; the
//!   bundled fixtures are used when unset

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default root URL of a locally running API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings shared by every request the harness issues.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL the resource paths are joined onto
    pub base_url: Url,
    /// Upper bound on a single request, connect included
    pub timeout: Duration,
    /// Fixture directory override
    pub fixtures_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with default settings.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fixtures_dir: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default(
            "SERVEREST_BASE_URL",
            DEFAULT_BASE_URL,
        ))?;
        let timeout = get_env_or_default("SERVEREST_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SERVEREST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let fixtures_dir = get_optional_env("SERVEREST_FIXTURES_DIR").map(PathBuf::from);

        Ok(Self {
            base_url,
            timeout,
            fixtures_dir,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a base URL, making sure it ends with `/` so paths join under it.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything that is not an
/// absolute http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("SERVEREST_BASE_URL".to_string(), msg);

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
