//! dmgen - data model compiler
//!
//! Compiles a wire-format schema into TypeScript type declarations, codecs,
//! shortcut constructors, query prototypes and a client find API.
//!
//! # Pipeline
//!
//! ```text
//! Schema (JSON)
//!     │
//!     ▼
//! Resolver::run() ──► EmitMap          (dmgen_resolve)
//!     │
//!     ▼
//! arrange() ──► dependency order       (dmgen_resolve)
//!     │
//!     ▼
//! QueryProjections / FindQueries       (dmgen_query)
//!     │
//!     ▼
//! render() ──► three TypeScript files  (dmgen_emit)
//! ```
//!
//! [`compile`] runs everything up to rendering; [`Compilation::render`]
//! produces the sources. The `dmgen` binary wraps both.

pub mod commands;
mod compile;
mod error;
mod logging;
mod output;

pub use compile::{compile, Compilation, RenderOptions, RenderedSources};
pub use error::CliError;
pub use logging::init_tracing;
pub use output::{write_output, WriteStatus};
