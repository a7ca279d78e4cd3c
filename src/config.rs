//! Browser configuration loading.
//!
//! Reads `config.toml` from the platform config directory, e.g.
//! `~/.config/mutation-browser/config.toml` on Linux. Every key is optional.
//!
//! ```toml
//! api_base_url = "http://localhost:8000"
//! request_timeout_secs = 30
//! stale_responses = "discard"
//! log_dir = "/var/log/mutation-browser"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::protocol::DEFAULT_BASE_URL;
use crate::{MutationBrowserError, Result};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// What to do with a response that resolves after a newer search was started.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Only the most recently dispatched search may update the view.
    #[default]
    Discard,
    /// Every response updates the view; the last one to arrive wins.
    Apply,
}

/// Browser configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Base URL of the variant API (defaults to http://localhost:8000)
    pub api_base_url: String,
    /// Per-request timeout; unset means requests run until the transport gives up
    pub request_timeout_secs: Option<u64>,
    /// Handling of out-of-order responses
    pub stale_responses: StaleResponsePolicy,
    /// Directory for rolling log files (defaults to <data dir>/logs)
    pub log_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            stale_responses: StaleResponsePolicy::default(),
            log_dir: None,
        }
    }
}

impl BrowserConfig {
    /// Load configuration from the platform config directory.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match project_dirs() {
            Some(dirs) => Self::load_from(&dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
            .map_err(|e| MutationBrowserError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| MutationBrowserError::Config(e.to_string()))
    }

    /// Directory log files are written to, if one can be determined.
    pub fn resolved_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join("logs")))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "mutation-browser")
}
