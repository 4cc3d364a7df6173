//! Global configuration: worker defaults loaded from the XDG config dir.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_node_workers() -> usize {
    4
}

fn default_item_workers() -> usize {
    4
}

/// Global configuration loaded from `~/.config/convoy/config.toml`.
/// CLI flags override these values per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvoyConfig {
    /// How many nodes are applied concurrently by default.
    #[serde(default = "default_node_workers")]
    pub node_workers: usize,
    /// How many items run concurrently inside one node by default.
    #[serde(default = "default_item_workers")]
    pub item_workers: usize,
}

impl Default for ConvoyConfig {
    fn default() -> Self {
        Self {
            node_workers: default_node_workers(),
            item_workers: default_item_workers(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("convoy")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ConvoyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ConvoyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ConvoyConfig = toml::from_str(&data)?;
    Ok(cfg)
}
