//! dmgen IR - Intermediate Representation Types
//!
//! Core data structures shared by every stage of the data model compiler:
//! - [`TypeReference`]: parsed generic reference expressions (`Foo<Bar, Baz>`)
//! - [`Ident`]: interned identifiers of locally emitted types
//! - [`TypeRef`]: resolved references (library, local, placeholders, markers)
//! - [`EmitCode`] / [`EmitMap`]: materialized type shapes, keyed by `Ident`
//! - [`CodegenError`]: the fatal error channel
//! - [`CodegenConfig`]: naming conventions and designated identifiers
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: local types are `Ident(u32)` indices, so the
//!   emission table is a flat arena rather than a map of strings.
//! - **Closed shapes**: every reference and emission kind is an enum; stages
//!   match exhaustively.
//! - **Ordered iteration**: hash maps are used for lookups only. Anything that
//!   is iterated keeps insertion order, so identical input gives identical
//!   output.

mod config;
mod emit;
mod error;
mod ident;
mod reference;
mod stack;
mod type_ref;
pub mod visit;

pub use config::CodegenConfig;
pub use emit::{BitMask, EmitCode, EmitField, EmitMap, EmitVariant};
pub use error::CodegenError;
pub use ident::{Ident, IdentTable};
pub use reference::{ParseRefError, TypeReference};
pub use stack::ensure_sufficient_stack;
pub use type_ref::{CompareFn, LibType, TypeRef};
