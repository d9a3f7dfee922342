//! INI file parsing.
//!
//! Accepts `[section]` headers, `key = value` lines and full-line `;`/`#`
//! comments. There is no quoting, escaping, interpolation or line
//! continuation: everything after the first `=` is the value.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use super::error::ParseErrorKind;
use super::line::{self, Line};
use super::source::{ConfigEntry, ConfigTable};
use super::ConfigError;

/// Size of the line buffer the parser was designed around.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniOptions {
    /// Longest accepted line in bytes, not counting the terminator.
    /// Longer lines are rejected rather than split or truncated.
    pub max_line_length: usize,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Parses the INI file at `path` into a fresh table.
///
/// The file handle is dropped on every return path. On error nothing of the
/// partially read file is kept.
pub fn parse_file(path: &Path, options: &IniOptions) -> Result<ConfigTable, ConfigError> {
    let file = File::open(path).map_err(|e| ConfigError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_reader(BufReader::new(file), path, options)
}

/// Parses INI text from any buffered reader. `path` is only used in errors.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    path: &Path,
    options: &IniOptions,
) -> Result<ConfigTable, ConfigError> {
    let mut table = ConfigTable::new();
    let mut section: Option<String> = None;
    let mut buf = Vec::new();
    let mut line_no = 0;

    // Content up to the limit plus a `\r\n` terminator; anything longer is
    // rejected without buffering the rest of the line.
    let read_limit = options.max_line_length.saturating_add(2) as u64;

    loop {
        buf.clear();
        let read = reader
            .by_ref()
            .take(read_limit)
            .read_until(b'\n', &mut buf)
            .map_err(|e| ConfigError::FileNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let parse_error = |kind| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: line_no,
            kind,
        };

        let bytes = strip_terminators(&buf);
        if bytes.len() > options.max_line_length {
            return Err(parse_error(ParseErrorKind::LineTooLong {
                max: options.max_line_length,
            }));
        }
        let content = String::from_utf8_lossy(bytes);

        match line::classify(&content) {
            Line::Skip => trace!(line = line_no, "skipping blank or comment line"),
            Line::Section(text) => {
                let end = text
                    .find(']')
                    .ok_or_else(|| parse_error(ParseErrorKind::InvalidSection))?;
                let name = &text[1..end];
                debug!(line = line_no, section = name, "entering section");
                section = Some(name.to_owned());
            }
            Line::Pair(text) => {
                let (key, value) = split_pair(text).map_err(parse_error)?;
                debug!(line = line_no, section = ?section, key, "parsed entry");
                table.push(ConfigEntry::new(section.as_deref(), key, value))?;
            }
        }
    }

    Ok(table)
}

/// The line without its trailing `\n`/`\r` bytes.
fn strip_terminators(mut bytes: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = bytes {
        bytes = rest;
    }
    bytes
}

/// Splits on the first `=` and trims both sides.
fn split_pair(text: &str) -> Result<(&str, &str), ParseErrorKind> {
    let (key, value) = text
        .split_once('=')
        .ok_or(ParseErrorKind::InvalidKeyValue)?;
    let key = line::trim(key);
    if key.is_empty() {
        return Err(ParseErrorKind::EmptyKey);
    }
    Ok((key, line::trim(value)))
}
