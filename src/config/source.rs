use serde::Serialize;

use super::ConfigError;

/// One `key = value` line, tagged with the section it appeared under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(section: Option<&str>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            section: section.map(str::to_owned),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Parsed entries in file order. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigTable {
    entries: Vec<ConfigEntry>,
}

impl ConfigTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, reporting allocation failure instead of aborting.
    pub fn push(&mut self, entry: ConfigEntry) -> Result<(), ConfigError> {
        self.entries
            .try_reserve(1)
            .map_err(|_| ConfigError::MemoryError)?;
        self.entries.push(entry);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// First entry under exactly `section` (`None` meaning no section) with `key`.
    pub fn find(&self, section: Option<&str>, key: &str) -> Option<&ConfigEntry> {
        self.entries
            .iter()
            .find(|e| e.section.as_deref() == section && e.key == key)
    }
}

impl<'a> IntoIterator for &'a ConfigTable {
    type Item = &'a ConfigEntry;
    type IntoIter = std::slice::Iter<'a, ConfigEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
