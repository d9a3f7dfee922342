//! Line normalization for the INI reader.

/// Whitespace as the C locale classifies it: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Trims [`is_space`] characters from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Trims leading [`is_space`] characters.
pub fn trim_start(s: &str) -> &str {
    s.trim_start_matches(is_space)
}

/// A raw line classified by its first meaningful character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty after trimming, or a full-line `;`/`#` comment.
    Skip,
    /// Starts with `[`; holds the text from the bracket on.
    Section(&'a str),
    /// Anything else; expected to be `key = value`.
    Pair(&'a str),
}

/// Strips line terminators and leading whitespace, then classifies the line.
///
/// Comments are only recognized at the start of a line; a `;` or `#` later on
/// is part of the value.
pub fn classify(raw: &str) -> Line<'_> {
    let line = trim_start(raw.trim_end_matches(['\n', '\r']));
    match line.chars().next() {
        None | Some(';') | Some('#') => Line::Skip,
        Some('[') => Line::Section(line),
        Some(_) => Line::Pair(line),
    }
}
