// src/config.rs
//! Client configuration
//!
//! # Example (TOML)
//!
//! ```toml
//! base_url = "http://localhost:8081"
//! session_path = "/home/cook/.config/recipe-sync/session.json"
//! login_page = "../login/login-page.html"
//! request_timeout_secs = 10   # unset = no deadline
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "RECIPE_SYNC_BASE_URL";

/// Recipe backend client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root URL (default: http://localhost:8081)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session file location (default: <config dir>/recipe-sync/session.json)
    #[serde(default)]
    pub session_path: Option<PathBuf>,

    /// Redirect target after logout and registration (default: login-page.html)
    #[serde(default = "default_login_page")]
    pub login_page: String,

    /// Per-request deadline in seconds (default: none)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_login_page() -> String {
    "login-page.html".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_path: None,
            login_page: default_login_page(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            debug!("{} overrides base URL", BASE_URL_ENV);
            self.base_url = base_url;
            self.validate()?;
        }
        Ok(self)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    /// Set the session file location
    pub fn with_session_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "Unsupported scheme '{}' in base URL",
                other
            ))),
        }
    }

    /// Request deadline, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Session file location, falling back to the platform config directory
    pub fn resolved_session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session_path {
            return Ok(path.clone());
        }
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        Ok(base.join("recipe-sync").join("session.json"))
    }
}
