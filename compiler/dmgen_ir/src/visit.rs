//! Shape visitor: every [`TypeRef`] inside a reference or an emitted shape.

use crate::{EmitCode, TypeRef};

/// Call `f` for `ty` and every reference nested in it, parents first.
pub fn walk_ref<'a>(ty: &'a TypeRef, f: &mut impl FnMut(&'a TypeRef)) {
    f(ty);
    match ty {
        TypeRef::Lib { params, .. }
        | TypeRef::Local { params, .. }
        | TypeRef::Foreign { params, .. } => {
            for param in params {
                walk_ref(param, f);
            }
        }
        TypeRef::Array { elem, .. } | TypeRef::SetWithCmp { elem, .. } => walk_ref(elem, f),
        TypeRef::Result { ok, err } => {
            walk_ref(ok, f);
            walk_ref(err, f);
        }
        TypeRef::Param(_) | TypeRef::Null => {}
    }
}

/// Call `f` for every reference in a shape: fields, variant payloads, tuple
/// elements and alias targets, including nested generic arguments.
pub fn walk_code<'a>(code: &'a EmitCode, f: &mut impl FnMut(&'a TypeRef)) {
    match code {
        EmitCode::Enum { variants } => {
            for variant in variants {
                walk_ref(&variant.ty, f);
            }
        }
        EmitCode::Struct { fields } => {
            for field in fields {
                walk_ref(&field.ty, f);
            }
        }
        EmitCode::Tuple { elements } => {
            for element in elements {
                walk_ref(element, f);
            }
        }
        EmitCode::Alias { to } => walk_ref(to, f),
        EmitCode::Bitmap { .. } => {}
    }
}

/// Highest generic placeholder index used by a shape, if any.
pub fn max_param_index(code: &EmitCode) -> Option<u32> {
    let mut max = None;
    walk_code(code, &mut |ty| {
        if let TypeRef::Param(index) = ty {
            max = max.max(Some(*index));
        }
    });
    max
}
