//! Client configuration and builder.
//!
//! # Example
//!
//! ```ignore
//! use termux_api::config::ApiConfig;
//! use std::time::Duration;
//!
//! let config = ApiConfig::builder()
//!     .api_path("/data/data/com.termux/files/usr/libexec/termux-api")
//!     .timeout(Duration::from_secs(30))
//!     .build();
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Install prefix of a stock Termux environment.
pub const TERMUX_PREFIX: &str = "/data/data/com.termux/files/usr";

/// Configuration for the Termux:API client.
///
/// Use [`ApiConfig::builder()`] to create a new configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // Helper binaries
    pub(crate) api_path: PathBuf,
    pub(crate) am_path: PathBuf,

    // Process options
    pub(crate) timeout: Option<Duration>,
    pub(crate) env_vars: HashMap<String, String>,
    pub(crate) inherit_env: bool,
}

impl ApiConfig {
    /// Create a new builder for ApiConfig.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Path of the API dispatch binary.
    pub fn api_path(&self) -> &Path {
        &self.api_path
    }

    /// Path of the Android activity manager binary.
    pub fn am_path(&self) -> &Path {
        &self.am_path
    }

    /// Upper bound on reading a helper's reply, if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The environment to hand to a spawned helper: `None` inherits the
    /// caller's environment unchanged, `Some` replaces it wholesale.
    pub(crate) fn spawn_env(&self) -> Option<HashMap<String, String>> {
        if self.inherit_env && self.env_vars.is_empty() {
            return None;
        }
        let mut env: HashMap<String, String> = if self.inherit_env {
            std::env::vars().collect()
        } else {
            HashMap::new()
        };
        env.extend(self.env_vars.clone());
        Some(env)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

/// Builder for [`ApiConfig`].
#[derive(Debug, Clone)]
pub struct ApiConfigBuilder {
    api_path: Option<PathBuf>,
    am_path: Option<PathBuf>,
    timeout: Option<Duration>,
    env_vars: HashMap<String, String>,
    inherit_env: bool,
}

impl Default for ApiConfigBuilder {
    fn default() -> Self {
        Self {
            api_path: None,
            am_path: None,
            timeout: None,
            env_vars: HashMap::new(),
            inherit_env: true, // Default: inherit parent environment
        }
    }
}

impl ApiConfigBuilder {
    /// Path of the API dispatch binary. Defaults to `termux-api`, resolved
    /// through `PATH`.
    pub fn api_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.api_path = Some(path.into());
        self
    }

    /// Path of the `am` (activity manager) binary. Defaults to the stock
    /// Termux location under [`TERMUX_PREFIX`].
    pub fn am_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.am_path = Some(path.into());
        self
    }

    /// Upper bound on reading a helper's reply. Unbounded when not set.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Add/override an environment variable for spawned helpers.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Whether spawned helpers inherit the parent environment (default true).
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            api_path: self.api_path.unwrap_or_else(|| PathBuf::from("termux-api")),
            am_path: self
                .am_path
                .unwrap_or_else(|| Path::new(TERMUX_PREFIX).join("bin/am")),
            timeout: self.timeout,
            env_vars: self.env_vars,
            inherit_env: self.inherit_env,
        }
    }
}
