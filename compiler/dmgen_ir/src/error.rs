//! Fatal compilation errors.
//!
//! Any of these means the schema does not match what the compiler expects
//! (usually a schema from a newer or older release). There is no recovery;
//! every stage propagates them with `?`.

/// Fatal error raised by any compilation stage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("no schema entry for `{reference}`")]
    MissingSchemaEntry { reference: String },

    #[error("no shape rule matched `{reference}` (schema/compiler version mismatch)")]
    NoRuleMatched { reference: String },

    /// A rule matched by name but the shape violates its assumptions.
    #[error("unexpected shape of `{reference}`: {reason}")]
    UnexpectedShape { reference: String, reason: String },

    #[error("recursive resolution of `{reference}`")]
    RecursiveResolution { reference: String },

    #[error("divergent generic instantiation of `{ident}`: `{first}` and `{second}` differ")]
    DivergentInstantiation {
        ident: String,
        first: String,
        second: String,
    },

    #[error("unexpected cycle through `{ident}`")]
    UnexpectedCycle { ident: String },

    #[error("`{from}` references breakpoint `{to}` eagerly")]
    EagerBreakpointReference { from: String, to: String },

    #[error("`{ident}` is referenced but never emitted")]
    MissingEmission { ident: String },

    #[error("malformed query type `{ident}`: {reason}")]
    MalformedQuery { ident: String, reason: String },

    #[error("selector `{id}` yields different outputs in different queries")]
    DivergentSelectorOutput { id: String },
}

impl CodegenError {
    pub fn unexpected_shape(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        CodegenError::UnexpectedShape {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_query(ident: impl Into<String>, reason: impl Into<String>) -> Self {
        CodegenError::MalformedQuery {
            ident: ident.into(),
            reason: reason.into(),
        }
    }
}
