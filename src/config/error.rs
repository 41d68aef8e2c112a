use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid nodesplus.toml")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}
