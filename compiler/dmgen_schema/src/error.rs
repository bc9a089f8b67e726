//! Schema loading errors.

use std::path::PathBuf;

/// Failure to load or assemble a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An extension entry collides with an entry already in the schema.
    #[error("schema entry `{key}` is already defined")]
    DuplicateEntry { key: String },
}
