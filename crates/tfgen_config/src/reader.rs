//! Config loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::models::Config;

/// Something that can produce a fully-populated [`Config`].
pub trait ConfigSource {
    fn load(&self) -> ConfigResult<Config>;
}

/// An in-memory config is its own source.
impl ConfigSource for Config {
    fn load(&self) -> ConfigResult<Config> {
        Ok(self.clone().normalize())
    }
}

/// Reads configuration from a JSON, YAML or TOML file.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode config text using the format implied by `path`'s extension.
    pub fn parse(path: &Path, content: &str) -> ConfigResult<Config> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let config: Config = match ext.as_str() {
            "json" => serde_json::from_str(content)?,
            "yaml" | "yml" => serde_yaml::from_str(content)?,
            "toml" => toml::from_str(content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        Ok(config.normalize())
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> ConfigResult<Config> {
        debug!("Reading config from {:?}", self.path);

        if !self.path.exists() {
            return Err(ConfigError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = Self::parse(&self.path, &content)?;

        debug!(
            "Loaded config with {} providers and {} variables",
            config.providers.len(),
            config.variables.len()
        );
        Ok(config)
    }
}
