//! Runtime configuration: endpoint base URLs and HTTP fetch settings.
//!
//! Every field has a default matching the public services, so a config file
//! is optional and may override any subset of keys:
//!
//! ```yaml
//! endpoints:
//!   pubmed: https://pubmed.ncbi.nlm.nih.gov
//!   libgen: https://libgen.is
//! fetch:
//!   timeout_secs: 20
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Browser-like identifier sent when the caller supplies no headers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout applied to every fetch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoints: Endpoints,
    pub fetch: FetchSettings,
}

/// Base URLs for each source, without trailing slash.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Endpoints {
    pub scholar: String,
    pub gutendex: String,
    /// Used to build ebook links for Gutendex results.
    pub gutenberg: String,
    pub libgen: String,
    pub pubmed: String,
    pub pdfdrive: String,
    pub openlibrary: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            scholar: "https://scholar.google.com".to_string(),
            gutendex: "https://gutendex.com".to_string(),
            gutenberg: "https://www.gutenberg.org".to_string(),
            libgen: "http://gen.lib.rus.ec".to_string(),
            pubmed: "https://pubmed.ncbi.nlm.nih.gov".to_string(),
            pdfdrive: "https://www.pdfdrive.com".to_string(),
            openlibrary: "https://openlibrary.org".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every source at the same base URL.
    #[cfg(test)]
    pub fn all_at(base: &str) -> Self {
        let base = base.to_string();
        Self {
            scholar: base.clone(),
            gutendex: base.clone(),
            gutenberg: base.clone(),
            libgen: base.clone(),
            pubmed: base.clone(),
            pdfdrive: base.clone(),
            openlibrary: base,
        }
    }

    fn normalized(mut self) -> Self {
        for url in [
            &mut self.scholar,
            &mut self.gutendex,
            &mut self.gutenberg,
            &mut self.libgen,
            &mut self.pubmed,
            &mut self.pdfdrive,
            &mut self.openlibrary,
        ] {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            *url = trimmed;
        }
        self
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub verify_tls: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            verify_tls: true,
        }
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SearchConfig {
    /// Load configuration from a YAML file, or return defaults when `path`
    /// is `None`.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a YAML string. Missing keys take defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(raw)?;
        config.endpoints = config.endpoints.normalized();
        Ok(config)
    }
}
