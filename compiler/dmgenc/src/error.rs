//! Driver errors.

use std::path::PathBuf;

use dmgen_ir::CodegenError;
use dmgen_schema::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("failed to {action} `{}`: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated file differs from its previous contents and `--update`
    /// was not passed.
    #[error("codegen changed `{}` (overwrite with --update)", path.display())]
    Outdated { path: PathBuf },

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }
}
