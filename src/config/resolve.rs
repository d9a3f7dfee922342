//! Key resolution across the environment and the parsed file.
//!
//! Order of precedence:
//! 1. the environment, by exact name then by upper-cased name;
//! 2. a file entry declared before any section header (first one wins);
//! 3. a sectioned file entry, where the last match in file order wins.
//!
//! Rule 2 beats rule 3 no matter where the entries sit in the file.

use serde::Serialize;
use tracing::debug;

use super::env::{lookup_env, EnvSource};
use super::source::{ConfigEntry, ConfigTable};

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Origin {
    Environment { variable: String },
    File {
        #[serde(skip_serializing_if = "Option::is_none")]
        section: Option<String>,
    },
}

/// A resolved value and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub value: String,
    pub origin: Origin,
}

pub fn resolve(env: &dyn EnvSource, table: &ConfigTable, key: &str) -> Option<Resolution> {
    if let Some(found) = lookup_env(env, key) {
        debug!(key, variable = %found.variable, "resolved from environment");
        return Some(Resolution {
            value: found.value,
            origin: Origin::Environment {
                variable: found.variable,
            },
        });
    }

    let entry = lookup_file(table, key)?;
    debug!(key, section = ?entry.section, "resolved from file");
    Some(Resolution {
        value: entry.value.clone(),
        origin: Origin::File {
            section: entry.section.clone(),
        },
    })
}

/// The file half of [`resolve`].
pub fn lookup_file<'a>(table: &'a ConfigTable, key: &str) -> Option<&'a ConfigEntry> {
    if let Some(entry) = table.find(None, key) {
        return Some(entry);
    }
    table
        .iter()
        .rev()
        .find(|e| e.section.is_some() && e.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(entries: &[(Option<&str>, &str, &str)]) -> ConfigTable {
        let mut table = ConfigTable::new();
        for (section, key, value) in entries {
            table.push(ConfigEntry::new(*section, *key, *value)).unwrap();
        }
        table
    }

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_environment_beats_file() {
        let env = HashMap::from([("PORT".to_string(), "9000".to_string())]);
        let t = table(&[(None, "port", "80")]);

        let resolved = resolve(&env, &t, "port").unwrap();
        assert_eq!(resolved.value, "9000");
        assert_eq!(
            resolved.origin,
            Origin::Environment {
                variable: "PORT".into()
            }
        );
    }

    #[test]
    fn test_unsectioned_entry_beats_later_sections() {
        let t = table(&[
            (Some("a"), "host", "from-a"),
            (None, "host", "top"),
            (Some("b"), "host", "from-b"),
        ]);
        let resolved = resolve(&no_env(), &t, "host").unwrap();
        assert_eq!(resolved.value, "top");
        assert_eq!(resolved.origin, Origin::File { section: None });
    }

    #[test]
    fn test_first_unsectioned_duplicate_wins() {
        let t = table(&[(None, "k", "first"), (None, "k", "second")]);
        assert_eq!(lookup_file(&t, "k").unwrap().value, "first");
    }

    #[test]
    fn test_last_section_wins_among_sections() {
        let t = table(&[
            (Some("a"), "host", "from-a"),
            (Some("b"), "host", "from-b"),
            (Some("b"), "port", "1"),
        ]);
        let resolved = resolve(&no_env(), &t, "host").unwrap();
        assert_eq!(resolved.value, "from-b");
        assert_eq!(
            resolved.origin,
            Origin::File {
                section: Some("b".into())
            }
        );
    }

    #[test]
    fn test_duplicates_within_one_section_last_wins() {
        let t = table(&[(Some("a"), "k", "1"), (Some("a"), "k", "2")]);
        assert_eq!(lookup_file(&t, "k").unwrap().value, "2");
    }

    #[test]
    fn test_missing_key_resolves_to_none() {
        let t = table(&[(Some("a"), "k", "1")]);
        assert!(resolve(&no_env(), &t, "other").is_none());
    }
}
