//! Layered configuration: an INI file overlaid by environment variables.

mod builder;
mod convert;
mod env;
mod error;
mod file;
mod line;
mod resolve;
mod source;

pub use builder::{ConfigStore, ConfigStoreBuilder, NO_ERROR};
pub use convert::{parse_bool, parse_double, parse_int};
pub use env::{lookup_env, EnvMatch, EnvSource, ProcessEnv};
pub use error::{ConfigError, ErrorCode, ParseErrorKind};
pub use file::{parse_file, parse_reader, IniOptions, DEFAULT_MAX_LINE_LENGTH};
pub use resolve::{lookup_file, resolve, Origin, Resolution};
pub use source::{ConfigEntry, ConfigTable};
