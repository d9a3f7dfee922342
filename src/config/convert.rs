//! Lenient string conversions used by the typed accessors.
//!
//! Each conversion either consumes the whole string or yields `None`; callers
//! substitute their default.

use super::line::trim_start;

/// Base-10 integer with optional sign. Leading whitespace is skipped, trailing
/// characters of any kind reject the value, as does overflow.
pub fn parse_int(s: &str) -> Option<i64> {
    trim_start(s).parse().ok()
}

/// `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, ignoring ASCII case.
pub fn parse_bool(s: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
    const FALSE: [&str; 4] = ["false", "0", "no", "off"];

    if TRUE.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| s.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

/// Floating point, same whitespace and full-consumption rules as [`parse_int`].
pub fn parse_double(s: &str) -> Option<f64> {
    trim_start(s).parse().ok()
}
