//! Configuration for actionlog.
//!
//! Everything the sync needs comes from one TOML file and is passed around
//! as an owned struct - no ambient globals.
//!
//! ```toml
//! token = "ghp_..."
//! owner = "acme"
//! repositories = ["widget", "gadget"]
//! db_path = "actions.db"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API token, sent as `Authorization: token {..}` on every request
    pub token: String,
    /// Account that owns the repositories
    pub owner: String,
    /// Repository names to sync, in order
    pub repositories: Vec<String>,
    /// SQLite database file for the archive
    pub db_path: PathBuf,
    /// API base URL override, for GHES deployments
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
