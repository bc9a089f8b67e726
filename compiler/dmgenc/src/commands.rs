//! Command implementations for the `dmgen` binary.
//!
//! Each command returns its result instead of printing, so `main` owns all
//! terminal output and tests can drive the commands directly.

use std::path::{Path, PathBuf};

use dmgen_ir::CodegenConfig;
use dmgen_schema::Schema;

use crate::{compile, write_output, CliError, RenderOptions, RenderedSources, WriteStatus};

/// Options of `dmgen generate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub schema: PathBuf,
    /// Extra schema entries merged into `schema`; overlapping keys are fatal.
    pub extensions: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub render: RenderOptions,
    /// Breakpoints added to the default set.
    pub breakpoints: Vec<String>,
    /// Overwrite files whose contents changed.
    pub update: bool,
}

impl GenerateOptions {
    pub fn new(schema: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            schema: schema.into(),
            extensions: Vec::new(),
            out_dir: PathBuf::from("."),
            render: RenderOptions::default(),
            breakpoints: Vec::new(),
            update: false,
        }
    }

    /// Parse the arguments following `generate`.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut schema = None;
        let mut options = GenerateOptions::new(PathBuf::new());
        let mut args = args.iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .cloned()
                    .ok_or_else(|| CliError::usage(format!("missing value for `{flag}`")))
            };
            match arg.as_str() {
                "--out-dir" | "-o" => options.out_dir = PathBuf::from(value(arg.as_str())?),
                "--lib-module" => options.render.lib_module = value(arg.as_str())?,
                "--prototypes-lib" => options.render.prototypes_lib = value(arg.as_str())?,
                "--client-lib" => options.render.client_lib = value(arg.as_str())?,
                "--breakpoint" => options.breakpoints.push(value(arg.as_str())?),
                "--extend" => options.extensions.push(PathBuf::from(value(arg.as_str())?)),
                "--update" => options.update = true,
                flag if flag.starts_with('-') => {
                    return Err(CliError::usage(format!("unknown option `{flag}`")));
                }
                path if schema.is_none() => schema = Some(PathBuf::from(path)),
                extra => return Err(CliError::usage(format!("unexpected argument `{extra}`"))),
            }
        }

        options.schema = schema.ok_or_else(|| CliError::usage("missing schema path"))?;
        Ok(options)
    }

    fn config(&self) -> CodegenConfig {
        let mut config = CodegenConfig::default();
        for breakpoint in &self.breakpoints {
            if !config.is_breakpoint(breakpoint) {
                config.breakpoints.push(breakpoint.clone());
            }
        }
        config
    }
}

/// Load `path` and merge `extensions` into it.
pub fn load_schema(path: &Path, extensions: &[PathBuf]) -> Result<Schema, CliError> {
    let mut schema = Schema::load(path)?;
    for extension in extensions {
        schema.extend(Schema::load(extension)?)?;
    }
    Ok(schema)
}

/// Compile and render, returning the sources without touching the disk.
pub fn render(options: &GenerateOptions) -> Result<RenderedSources, CliError> {
    let schema = load_schema(&options.schema, &options.extensions)?;
    let compilation = compile(&schema, &options.config())?;
    Ok(compilation.render(&options.render)?)
}

/// `dmgen generate`: render and write every source into `out_dir`.
///
/// Stops at the first file that cannot be written, including a changed
/// file without `update`.
pub fn generate(options: &GenerateOptions) -> Result<Vec<(PathBuf, WriteStatus)>, CliError> {
    let sources = render(options)?;
    sources
        .files()
        .into_iter()
        .map(|(name, contents)| {
            let path = options.out_dir.join(name);
            let status = write_output(&path, contents, options.update)?;
            Ok((path, status))
        })
        .collect()
}

/// Counts reported by `dmgen check`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub schema_entries: usize,
    pub types: usize,
    pub queries: usize,
    pub singular_queries: usize,
    pub selectors: usize,
}

/// `dmgen check`: compile and render without writing.
pub fn check(path: &Path, extensions: &[PathBuf]) -> Result<CheckSummary, CliError> {
    let schema = load_schema(path, extensions)?;
    let compilation = compile(&schema, &CodegenConfig::default())?;
    compilation.render(&RenderOptions::default())?;
    Ok(CheckSummary {
        schema_entries: schema.len(),
        types: compilation.order.len(),
        queries: compilation.queries.iterable.len(),
        singular_queries: compilation.queries.singular.len(),
        selectors: compilation.projections.outputs.len(),
    })
}
