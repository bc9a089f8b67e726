//! Compilation conventions.

/// Designated identifiers and naming conventions of the data model.
///
/// `Default` matches the upstream schema; the CLI only overrides fields
/// passed on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Identifiers whose references are always lazy, breaking the schema's
    /// reference cycles.
    pub breakpoints: Vec<String>,
    /// Enum whose variants are the iterable queries.
    pub query_box: String,
    /// Enum whose variants are the singular queries.
    pub singular_query_box: String,
    /// Enum listing every query output batch kind.
    pub output_box: String,
    /// Identifier prefix of map-key projections (`MetadataKeyProjection...`).
    pub map_key_prefix: String,
    pub predicate_suffix: String,
    pub selector_suffix: String,
    /// Selector types whose output batch variant is named differently.
    pub selector_output_exceptions: Vec<(String, String)>,
    /// `_ms` fields holding a point in time rather than a duration.
    pub timestamp_fields: Vec<String>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
        Self {
            breakpoints: owned(&["InstructionBox"]),
            query_box: "QueryBox".into(),
            singular_query_box: "SingularQueryBox".into(),
            output_box: "QueryOutputBatchBox".into(),
            map_key_prefix: "MetadataKeyProjection".into(),
            predicate_suffix: "ProjectionPredicate".into(),
            selector_suffix: "ProjectionSelector".into(),
            selector_output_exceptions: [
                ("PeerId", "Peer"),
                ("SignedBlock", "Block"),
                ("TransactionError", "TransactionRejectionReason"),
            ]
            .iter()
            .map(|(from, to)| ((*from).to_owned(), (*to).to_owned()))
            .collect(),
            timestamp_fields: owned(&[
                "start_ms",
                "creation_time_ms",
                "since_ms",
                "proposed_at_ms",
                "expires_at_ms",
            ]),
        }
    }
}

impl CodegenConfig {
    pub fn is_breakpoint(&self, name: &str) -> bool {
        self.breakpoints.iter().any(|b| b == name)
    }

    pub fn is_timestamp_field(&self, name: &str) -> bool {
        self.timestamp_fields.iter().any(|f| f == name)
    }

    /// Output batch variant name for a selector type name.
    pub fn selector_output_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.selector_output_exceptions
            .iter()
            .find(|(from, _)| from == name)
            .map_or(name, |(_, to)| to.as_str())
    }
}
