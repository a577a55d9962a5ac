use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeanLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse config file '{}': {}", path.display(), source)]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Invalid process: {}", .0.join("; "))]
    InvalidProcess(Vec<String>),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, LeanLensError>;
