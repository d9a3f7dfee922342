//! Command-line harness for inspecting a configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{parse_bool, parse_double, parse_int, ConfigError, ConfigStore};
use crate::Error;

/// Resolve settings from an INI file and the environment
#[derive(Parser, Debug)]
#[command(name = "fread", version)]
#[command(about = "Resolve settings from an INI file and the environment")]
#[command(long_about = "
Reads an optional INI file and resolves keys against it, letting environment
variables override file values. A key is looked up in the environment as
given, then upper-cased.

EXAMPLES:
    fread --file app.ini get name
    fread --file app.ini get port --as int --default 8080
    PORT=9000 fread --file app.ini explain port
    fread --file app.ini dump
")]
pub struct Cli {
    /// INI file to load; without it only the environment is consulted
    #[arg(short, long, value_name = "FILE", env = "FREAD_CONFIG")]
    pub file: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value of a key
    Get {
        key: String,

        /// Type to read the value as
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Value printed when the key is missing or does not convert
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print a key's value and where it came from
    Explain { key: String },

    /// Print every parsed file entry as TOML
    Dump,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    Bool,
    Double,
}

impl Cli {
    /// Builds the store this invocation reads from.
    pub fn load(&self) -> Result<ConfigStore, ConfigError> {
        let mut builder = ConfigStore::builder();
        if let Some(path) = &self.file {
            builder = builder.with_file(path);
        }
        builder.build()
    }
}

/// Runs `command` against `store` and returns the text to print.
pub fn run(command: &Command, store: &ConfigStore) -> Result<String, Error> {
    match command {
        Command::Get { key, kind, default } => get(store, key, *kind, default.as_deref()),
        Command::Explain { key } => match store.resolve(key) {
            Some(resolution) => Ok(toml::to_string(&resolution)?),
            None => Ok(format!("{key}: not found\n")),
        },
        Command::Dump => Ok(toml::to_string(store.entries())?),
    }
}

fn get(
    store: &ConfigStore,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> Result<String, Error> {
    let default = default.unwrap_or_default();
    let rendered = match kind {
        ValueKind::String => store.get_string(key, default),
        ValueKind::Int => {
            let fallback = typed_default(default, kind, parse_int)?.unwrap_or(0);
            store.get_int(key, fallback).to_string()
        }
        ValueKind::Bool => {
            let fallback = typed_default(default, kind, parse_bool)?.unwrap_or(false);
            store.get_bool(key, fallback).to_string()
        }
        ValueKind::Double => {
            let fallback = typed_default(default, kind, parse_double)?.unwrap_or(0.0);
            store.get_double(key, fallback).to_string()
        }
    };
    Ok(format!("{rendered}\n"))
}

/// Converts a `--default` argument; an empty one means "use the type's zero".
fn typed_default<T>(
    default: &str,
    kind: ValueKind,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, Error> {
    if default.is_empty() {
        return Ok(None);
    }
    parse(default)
        .map(Some)
        .ok_or_else(|| Error::InvalidDefault {
            kind: format!("{kind:?}").to_lowercase(),
            value: default.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store(lines: &[&str], vars: &[(&str, &str)]) -> (NamedTempFile, ConfigStore) {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let store = ConfigStore::builder()
            .with_file(file.path())
            .with_env(env)
            .build()
            .unwrap();
        (file, store)
    }

    fn get_cmd(key: &str, kind: ValueKind, default: Option<&str>) -> Command {
        Command::Get {
            key: key.into(),
            kind,
            default: default.map(Into::into),
        }
    }

    #[test]
    fn test_parses_arguments() {
        let cli = Cli::try_parse_from([
            "fread", "-f", "app.ini", "get", "port", "--as", "int", "-d", "80",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("app.ini")));
        match cli.command {
            Command::Get { key, kind, default } => {
                assert_eq!(key, "port");
                assert_eq!(kind, ValueKind::Int);
                assert_eq!(default.as_deref(), Some("80"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_get_typed_values() {
        let (_file, store) = store(&["[app]", "port = 3306", "debug = on"], &[]);

        let out = run(&get_cmd("port", ValueKind::Int, None), &store).unwrap();
        assert_eq!(out, "3306\n");
        let out = run(&get_cmd("debug", ValueKind::Bool, None), &store).unwrap();
        assert_eq!(out, "true\n");
        let out = run(&get_cmd("missing", ValueKind::Double, Some("1.5")), &store).unwrap();
        assert_eq!(out, "1.5\n");
    }

    #[test]
    fn test_get_rejects_bad_default() {
        let (_file, store) = store(&[], &[]);
        let err = run(&get_cmd("port", ValueKind::Int, Some("eighty")), &store).unwrap_err();
        assert!(matches!(err, Error::InvalidDefault { .. }));
    }

    #[test]
    fn test_explain_reports_origin() {
        let (_file, store) = store(&["[db]", "host = localhost"], &[("PORT", "9000")]);

        let out = run(&Command::Explain { key: "host".into() }, &store).unwrap();
        assert!(out.contains("value = \"localhost\""));
        assert!(out.contains("source = \"file\""));
        assert!(out.contains("section = \"db\""));

        let out = run(&Command::Explain { key: "port".into() }, &store).unwrap();
        assert!(out.contains("source = \"environment\""));
        assert!(out.contains("variable = \"PORT\""));

        let out = run(&Command::Explain { key: "nope".into() }, &store).unwrap();
        assert_eq!(out, "nope: not found\n");
    }

    #[test]
    fn test_dump_lists_entries_in_file_order() {
        let (_file, store) = store(&["top = 1", "[s]", "inner = 2"], &[]);
        let out = run(&Command::Dump, &store).unwrap();

        let top = out.find("key = \"top\"").unwrap();
        let inner = out.find("key = \"inner\"").unwrap();
        assert!(top < inner);
        assert!(out.contains("section = \"s\""));
    }
}
