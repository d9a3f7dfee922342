pub mod cli;
pub mod config;
mod error;

pub use config::{ConfigError, ConfigStore};
pub use error::Error;
