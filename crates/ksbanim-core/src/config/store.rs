//! Config store for loading ksbanim.toml.

use std::path::PathBuf;

use super::{KsbConfig, parser};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load(&self) -> anyhow::Result<KsbConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                path = %self.config_path.display(),
                "config file not found, using defaults"
            );
            return Ok(KsbConfig::new());
        }
        parser::parse_ksb_toml(&self.config_path)
    }
}
