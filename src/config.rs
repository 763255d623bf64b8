//! Runtime configuration.
//!
//! Values are resolved in layers: built-in defaults, then an optional TOML
//! file, then environment variables. CLI flags are applied last by the binary.
//!
//! # Configuration File Format
//!
//! ```toml
//! search_endpoint = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
//! fetch_endpoint = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi"
//! max_results = 20
//! timeout_secs = 30
//! api_key = "your-ncbi-key"
//! ```

use crate::error::{PapersError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// E-utilities search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str =
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// E-utilities fetch endpoint
pub const DEFAULT_FETCH_ENDPOINT: &str =
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Default number of IDs requested from the search step
pub const DEFAULT_MAX_RESULTS: usize = 20;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search endpoint URL (returns article IDs)
    pub search_endpoint: String,
    /// Fetch endpoint URL (returns article metadata)
    pub fetch_endpoint: String,
    /// Maximum number of article IDs requested
    pub max_results: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// NCBI API key, sent with both requests when set
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            fetch_endpoint: DEFAULT_FETCH_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PapersError::Config(format!("Invalid config: {}", e)))
    }

    /// Load a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PapersError::Config(format!("Cannot read config file {:?}: {}", path, e))
        })?;
        debug!(path = ?path, "Loaded config file");
        Self::from_toml_str(&content)
    }

    /// Resolve configuration from an explicit file, else the default file if
    /// it exists, else defaults; then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PUBMED_SEARCH_ENDPOINT") {
            self.search_endpoint = v;
        }
        if let Some(v) = lookup("PUBMED_FETCH_ENDPOINT") {
            self.fetch_endpoint = v;
        }
        if let Some(v) = lookup("PUBMED_MAX_RESULTS") {
            self.max_results = v.trim().parse().map_err(|_| {
                PapersError::Config(format!("PUBMED_MAX_RESULTS is not a number: {}", v))
            })?;
        }
        if self.api_key.is_none() {
            self.api_key = lookup("NCBI_API_KEY").filter(|k| !k.is_empty());
        }
        Ok(())
    }

    /// Check endpoint URLs and limits.
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("search_endpoint", &self.search_endpoint),
            ("fetch_endpoint", &self.fetch_endpoint),
        ] {
            Url::parse(endpoint).map_err(|e| {
                PapersError::Config(format!("Invalid {}: {} ({})", name, endpoint, e))
            })?;
        }
        if self.max_results == 0 {
            return Err(PapersError::Validation(
                "max_results must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config file: `<config_dir>/pubmed-papers/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pubmed-papers").join("config.toml"))
}
