use crate::error::{LeanLensError, Result};
use crate::storage::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".leanlens/config.toml";

/// Configuration loaded from `.leanlens/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeanLensConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Prefix for every stored key
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Directory holding saved records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".leanlens/data")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LeanLensConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: LeanLensConfig =
        toml::from_str(&content).map_err(|source| LeanLensError::Config {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config)
}

/// Load `explicit` if given; otherwise the default location when it exists;
/// otherwise built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<LeanLensConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.is_file() {
                load_config(default_path)
            } else {
                Ok(LeanLensConfig::default())
            }
        }
    }
}
