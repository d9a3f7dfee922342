use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the fread library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid {kind} default: {value:?}")]
    InvalidDefault { kind: String, value: String },

    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}
