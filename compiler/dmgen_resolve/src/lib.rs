//! dmgen resolution: from raw schema entries to an ordered emission table.
//!
//! # Pipeline
//!
//! 1. **Resolve** ([`Resolver::resolve_all`]): every schema key is matched
//!    against the shape rules and memoized as a [`ResolvedRef`]. Local types
//!    carry an [`EmitPlan`] describing how to build their shape, but their
//!    fields are not resolved yet, so mutually recursive types never recurse
//!    here.
//! 2. **Materialize** ([`Resolver::materialize_all`]): plans are turned into
//!    [`EmitCode`](dmgen_ir::EmitCode)s in memo order. Generic identifiers are
//!    materialized once per instantiation and must agree.
//! 3. **Prune** ([`Resolver::prune_empty_enums`]): enums without any
//!    constructible variant become zero-variant enums.
//! 4. **Arrange** ([`arrange`]): dependency order for emission, with
//!    breakpoint identifiers breaking the schema's cycles.
//!
//! Shortcut trees ([`enum_shortcuts`]) are used by both pruning and the
//! emitter.

mod arrange;
mod fields;
mod matcher;
mod plan;
mod resolver;
mod shortcuts;

pub use arrange::arrange;
pub use plan::{EmitPlan, FieldPlan, ResolvedRef};
pub use resolver::Resolver;
pub use shortcuts::{enum_shortcuts, ShortcutKind, ShortcutTree, ShortcutVariant};
