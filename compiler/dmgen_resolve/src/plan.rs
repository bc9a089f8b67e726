//! Memo entries and closure-free emission plans.

use dmgen_ir::{EmitCode, TypeRef};
use dmgen_schema::{EnumVariant, StructField};

/// How to build the shape of a local type once everything is resolved.
///
/// Plans refer to other types by their schema key, never by resolved
/// reference, so building a plan never recurses into field types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmitPlan {
    /// Shape already known at match time.
    Ready(EmitCode),
    Struct(Vec<FieldPlan>),
    /// Raw variants, mapped with the variant rewrites.
    Enum(Vec<EnumVariant>),
    /// Alias of `target`. With `flatten_result`, a result target becomes an
    /// `Ok`/`Err` enum.
    Alias {
        target: String,
        flatten_result: bool,
    },
    /// Set of `element` ordered by name, then payload.
    PermissionSet { element: String },
}

/// One field of a [`EmitPlan::Struct`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldPlan {
    /// Generic placeholder `T{index}`.
    Param { name: String, index: u32 },
    /// Resolve `path` as is.
    Resolve { name: String, path: String },
    /// Raw field, subject to the `_ms` and `errors` rewrites.
    Mapped(StructField),
}

/// Memoized result of resolving one schema key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRef {
    pub ty: TypeRef,
    /// Present when this key introduces a local shape.
    pub plan: Option<EmitPlan>,
}

impl ResolvedRef {
    /// Reference that introduces no shape of its own.
    pub fn plain(ty: TypeRef) -> Self {
        Self { ty, plan: None }
    }

    pub fn with_plan(ty: TypeRef, plan: EmitPlan) -> Self {
        Self {
            ty,
            plan: Some(plan),
        }
    }
}
