//! One compilation run.

use dmgen_emit::{generate_data_model, generate_find_api, generate_prototypes};
use dmgen_ir::{CodegenConfig, CodegenError, EmitMap, Ident};
use dmgen_query::{FindQueries, QueryProjections};
use dmgen_resolve::{arrange, Resolver};
use dmgen_schema::Schema;
use tracing::info;

/// Everything derived from a schema, ready to render.
#[derive(Clone, Debug)]
pub struct Compilation {
    pub config: CodegenConfig,
    pub emits: EmitMap,
    /// Dependency order of `emits`.
    pub order: Vec<Ident>,
    pub projections: QueryProjections,
    pub queries: FindQueries,
}

/// Modules the rendered sources import their runtime from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Runtime of the data model module.
    pub lib_module: String,
    /// Module the prototypes import types from.
    pub prototypes_lib: String,
    /// Client module of the find API.
    pub client_lib: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lib_module: "./types.generated.prelude.ts".into(),
            prototypes_lib: "./prototypes.generated.prelude.ts".into(),
            client_lib: "./find-api.generated.prelude.ts".into(),
        }
    }
}

/// The three rendered sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedSources {
    pub data_model: String,
    pub prototypes: String,
    pub find_api: String,
}

impl RenderedSources {
    pub const DATA_MODEL_FILE: &'static str = "types.generated.ts";
    pub const PROTOTYPES_FILE: &'static str = "prototypes.generated.ts";
    pub const FIND_API_FILE: &'static str = "find-api.generated.ts";

    /// `(file name, contents)` of every source.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (Self::DATA_MODEL_FILE, &self.data_model),
            (Self::PROTOTYPES_FILE, &self.prototypes),
            (Self::FIND_API_FILE, &self.find_api),
        ]
    }
}

/// Resolve, order and project `schema`.
#[tracing::instrument(level = "debug", skip_all, fields(entries = schema.len()))]
pub fn compile(schema: &Schema, config: &CodegenConfig) -> Result<Compilation, CodegenError> {
    let emits = Resolver::run(schema, config)?;
    let order = arrange(&emits, config)?;
    let projections = QueryProjections::build(&emits, config)?;
    let queries = FindQueries::collect(&emits, config)?;
    info!(
        types = order.len(),
        queries = projections.queries.len(),
        selectors = projections.outputs.len(),
        "compiled schema"
    );
    Ok(Compilation {
        config: config.clone(),
        emits,
        order,
        projections,
        queries,
    })
}

impl Compilation {
    pub fn render(&self, options: &RenderOptions) -> Result<RenderedSources, CodegenError> {
        Ok(RenderedSources {
            data_model: generate_data_model(&self.emits, &self.order, &options.lib_module)?,
            prototypes: generate_prototypes(&self.projections, self.emits.idents(), &options.prototypes_lib)?,
            find_api: generate_find_api(&self.queries, &self.config, &options.client_lib),
        })
    }
}
