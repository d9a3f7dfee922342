use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to open config file '{path}': {source}")]
    FileNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}' at line {line}: {kind}")]
    ParseError {
        path: PathBuf,
        line: usize,
        kind: ParseErrorKind,
    },

    #[error("memory allocation failed")]
    MemoryError,

    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// The syntactic rule a malformed line broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid section format")]
    InvalidSection,

    #[error("invalid key-value format")]
    InvalidKeyValue,

    #[error("empty key")]
    EmptyKey,

    #[error("line exceeds the {max} byte limit")]
    LineTooLong { max: usize },
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    FileNotFound,
    ParseError,
    MemoryError,
    KeyNotFound,
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ConfigError::ParseError { .. } => ErrorCode::ParseError,
            ConfigError::MemoryError => ErrorCode::MemoryError,
            ConfigError::KeyNotFound(_) => ErrorCode::KeyNotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_variants() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("app.ini"),
            line: 3,
            kind: ParseErrorKind::EmptyKey,
        };
        assert_eq!(err.code(), ErrorCode::ParseError);
        assert_eq!(ConfigError::MemoryError.code(), ErrorCode::MemoryError);
        assert_eq!(
            ConfigError::KeyNotFound("x".into()).code(),
            ErrorCode::KeyNotFound
        );
    }

    #[test]
    fn test_parse_error_message_names_line() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("app.ini"),
            line: 7,
            kind: ParseErrorKind::InvalidSection,
        };
        assert_eq!(
            err.to_string(),
            "failed to parse config file 'app.ini' at line 7: invalid section format"
        );
    }
}
