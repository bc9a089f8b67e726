//! Enum shortcut trees.
//!
//! A shortcut tree lists, for an enum, every way to construct it in one
//! step: unit variants directly, payload variants through a constructor, and
//! variants whose payload is itself an enum through the nested enum's own
//! shortcuts. Nested enums with no constructible variant are left out, so an
//! enum whose tree is empty can never be constructed.

use dmgen_ir::{ensure_sufficient_stack, CodegenError, EmitCode, EmitMap, EmitVariant, Ident, TypeRef};

/// Shortcut constructors of one enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutTree {
    /// Identifier the variant payload refers to (possibly an alias of the enum).
    pub id: Ident,
    pub variants: Vec<ShortcutVariant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutVariant {
    pub name: String,
    pub kind: ShortcutKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShortcutKind {
    Unit,
    /// Constructor taking the payload.
    Value(TypeRef),
    /// Payload is an enum with shortcuts of its own.
    Enum(ShortcutTree),
}

/// Shortcuts for a list of variants.
pub fn enum_shortcuts(
    variants: &[EmitVariant],
    emits: &EmitMap,
) -> Result<Vec<ShortcutVariant>, CodegenError> {
    build(variants, emits, &mut Vec::new())
}

/// Shortcut tree of the enum `ident` (following aliases).
#[cfg(test)]
pub(crate) fn shortcut_tree(ident: Ident, emits: &EmitMap) -> Result<ShortcutTree, CodegenError> {
    let variants = match find_enum(emits, ident)? {
        Some((found, variants)) => build(variants, emits, &mut vec![found])?,
        None => Vec::new(),
    };
    Ok(ShortcutTree { id: ident, variants })
}

/// Follow local aliases from `ident` to an enum.
fn find_enum(emits: &EmitMap, ident: Ident) -> Result<Option<(Ident, &[EmitVariant])>, CodegenError> {
    let mut current = ident;
    // An alias chain longer than the table is a loop.
    for _ in 0..=emits.len() {
        let code = emits.get(current).ok_or_else(|| CodegenError::MissingEmission {
            ident: emits.name(current).to_owned(),
        })?;
        match code {
            EmitCode::Enum { variants } => return Ok(Some((current, variants))),
            EmitCode::Alias {
                to: TypeRef::Local { id, .. },
            } => current = *id,
            _ => return Ok(None),
        }
    }
    Ok(None)
}

/// `visiting` holds the enums being expanded on the current path; meeting
/// one of them again yields a value leaf instead of recursing.
fn build(
    variants: &[EmitVariant],
    emits: &EmitMap,
    visiting: &mut Vec<Ident>,
) -> Result<Vec<ShortcutVariant>, CodegenError> {
    let mut out = Vec::with_capacity(variants.len());
    for variant in variants {
        let kind = match &variant.ty {
            TypeRef::Null => ShortcutKind::Unit,
            TypeRef::Local { id, .. } => match find_enum(emits, *id)? {
                Some((found, nested)) if !visiting.contains(&found) => {
                    visiting.push(found);
                    let nested = ensure_sufficient_stack(|| build(nested, emits, visiting));
                    visiting.pop();
                    let nested = nested?;
                    if nested.is_empty() {
                        continue;
                    }
                    ShortcutKind::Enum(ShortcutTree {
                        id: *id,
                        variants: nested,
                    })
                }
                _ => ShortcutKind::Value(variant.ty.clone()),
            },
            other => ShortcutKind::Value(other.clone()),
        };
        out.push(ShortcutVariant {
            name: variant.tag.clone(),
            kind,
        });
    }
    Ok(out)
}
