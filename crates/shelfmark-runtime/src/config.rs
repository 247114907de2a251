use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SHELFMARK_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.shelfmark (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("SHELFMARK_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("shelfmark"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".shelfmark"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Tunables for one list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub page_size: usize,
    /// Quiet period before a search edit is applied
    pub debounce_ms: u64,
    pub history_capacity: usize,
    /// Maximum cached pages; 0 disables the page cache
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
    pub item_height: f64,
    pub container_height: f64,
    pub overscan: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            debounce_ms: 300,
            history_capacity: 50,
            cache_capacity: 64,
            cache_ttl_secs: 60,
            item_height: 50.0,
            container_height: 500.0,
            overscan: 5,
        }
    }
}

impl EngineConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_data_dir(None)?.join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if !(self.item_height.is_finite() && self.item_height > 0.0) {
            return Err(Error::Config("item_height must be positive".to_string()));
        }
        if !(self.container_height.is_finite() && self.container_height >= 0.0) {
            return Err(Error::Config(
                "container_height must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
