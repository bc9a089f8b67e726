//! Client `FindAPI` class: one convenience method per query.

use dmgen_ir::CodegenConfig;
use dmgen_query::FindQueries;

const CORE_MODULE: &str = "@iroha/core";
const TYPES_MODULE: &str = "@iroha/core/data-model";

/// Render the find API module. `lib_client` is the client module providing
/// `QueryBuilder` and the query executor.
pub fn generate_find_api(queries: &FindQueries, config: &CodegenConfig, lib_client: &str) -> String {
    let mut lines = vec![
        format!("import * as client from '{lib_client}'"),
        format!("import type * as core from '{CORE_MODULE}'"),
        format!("import type * as types from '{TYPES_MODULE}'"),
        "export class FindAPI {".to_owned(),
        "  private _executor: client.QueryExecutor".to_owned(),
        "  public constructor(executor: client.QueryExecutor) { this._executor = executor; }".to_owned(),
    ];

    for query in &queries.iterable {
        let tag = &query.tag;
        let (arg, value) = match &query.payload {
            Some(payload) => (format!("payload: types.{payload}, "), "payload, "),
            None => (String::new(), ""),
        };
        lines.push(format!(
            "  /** Convenience method for `{tag}` query, a variant of {{@linkcode types.{}}} enum. */\n\
             \x20 public {}({arg}params?: core.QueryBuilderParams): client.QueryBuilder<'{tag}'> {{\n\
             \x20   return new client.QueryBuilder(this._executor, '{tag}', {value}params)\n\
             \x20 }}\n",
            config.query_box, query.method,
        ));
    }

    for query in &queries.singular {
        let tag = &query.tag;
        lines.push(format!(
            "  /** Convenience method for `{tag}` query, a variant of {{@linkcode types.{}}} enum. */\n\
             \x20 public {}(): Promise<core.GetSingularQueryOutput<'{tag}'>> {{\n\
             \x20   return client.executeSingularQuery(this._executor, '{tag}')\n\
             \x20 }}\n",
            config.singular_query_box, query.method,
        ));
    }

    lines.push("}".to_owned());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
