use std::collections::{BTreeMap, HashMap};

/// Where environment variables are read from.
///
/// [`ProcessEnv`] reads the real process environment; the map impls let a
/// store be driven by a fixed set of variables.
pub trait EnvSource: Send + Sync + std::fmt::Debug {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the running process.
///
/// Values that are not valid UTF-8 are decoded lossily, so a variable that is
/// set always shadows the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// A variable found in the environment and the name it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvMatch {
    pub variable: String,
    pub value: String,
}

/// Looks `key` up as given, then upper-cased.
///
/// Only the upper-case spelling is tried as a fallback: `Port` finds `Port` or
/// `PORT`, never `port`.
pub fn lookup_env(env: &dyn EnvSource, key: &str) -> Option<EnvMatch> {
    if !is_valid_name(key) {
        return None;
    }
    if let Some(value) = env.var(key) {
        return Some(EnvMatch {
            variable: key.to_owned(),
            value,
        });
    }

    let upper = key.to_ascii_uppercase();
    if upper == key {
        return None;
    }
    env.var(&upper).map(|value| EnvMatch {
        variable: upper,
        value,
    })
}

fn is_valid_name(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}
