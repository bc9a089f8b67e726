//! The schema document.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{SchemaEntry, SchemaError};

/// Mapping from canonical reference string to raw shape.
///
/// Entries keep the order the document declares them in. Resolution,
/// arrangement roots and the emitted file all follow that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    entries: IndexMap<String, SchemaEntry>,
}

impl Schema {
    /// Parse a schema from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a schema file.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_json_str(&text)?;
        tracing::debug!(entries = schema.len(), "schema loaded");
        Ok(schema)
    }

    /// Add entries that the upstream schema does not ship.
    ///
    /// New entries go after the existing ones, in their declared order.
    /// Fails without modifying `self` if any key is already present.
    pub fn extend(&mut self, extension: Schema) -> Result<(), SchemaError> {
        if let Some(key) = extension
            .entries
            .keys()
            .find(|key| self.entries.contains_key(*key))
        {
            return Err(SchemaError::DuplicateEntry { key: key.clone() });
        }
        self.entries.extend(extension.entries);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(key)
    }

    /// Canonical reference strings, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
