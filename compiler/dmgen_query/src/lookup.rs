//! Shape lookups shared by the tree builders.

use dmgen_ir::{CodegenConfig, CodegenError, EmitCode, EmitMap, EmitVariant, Ident, TypeRef};

use crate::QueryArg;

/// Variants of the enum `ident`.
pub(crate) fn enum_variants(emits: &EmitMap, ident: Ident) -> Result<&[EmitVariant], CodegenError> {
    match emits.get(ident) {
        Some(EmitCode::Enum { variants }) => Ok(variants),
        Some(other) => Err(CodegenError::malformed_query(
            emits.name(ident),
            format!("expected an enum, found {}", other.kind_name()),
        )),
        None => Err(CodegenError::MissingEmission {
            ident: emits.name(ident).to_owned(),
        }),
    }
}

/// Variants of the enum called `name`.
pub(crate) fn enum_variants_named<'a>(
    emits: &'a EmitMap,
    name: &str,
) -> Result<&'a [EmitVariant], CodegenError> {
    let ident = emits.ident(name).ok_or_else(|| CodegenError::MissingEmission {
        ident: name.to_owned(),
    })?;
    enum_variants(emits, ident)
}

/// Identifier of a local payload.
pub(crate) fn local_payload(
    emits: &EmitMap,
    owner: Ident,
    variant: &EmitVariant,
) -> Result<Ident, CodegenError> {
    variant.ty.local_id().ok_or_else(|| {
        CodegenError::malformed_query(
            emits.name(owner),
            format!("variant `{}` does not hold a local type", variant.tag),
        )
    })
}

/// Whether `ident` is a map-key projection (`struct { key, projection }`).
pub(crate) fn is_key_projection(emits: &EmitMap, config: &CodegenConfig, ident: Ident) -> bool {
    emits.name(ident).starts_with(&config.map_key_prefix)
}

/// Split a map-key projection into its key argument and the projection of
/// the looked-up value.
pub(crate) fn key_projection(emits: &EmitMap, ident: Ident) -> Result<(QueryArg, Ident), CodegenError> {
    let malformed = |reason: &str| CodegenError::malformed_query(emits.name(ident), reason);
    let Some(EmitCode::Struct { fields }) = emits.get(ident) else {
        return Err(malformed("map-key projection is not a struct"));
    };
    let [key, projection, ..] = fields.as_slice() else {
        return Err(malformed("map-key projection needs a key and a projection"));
    };
    let TypeRef::Local { id, .. } = &projection.ty else {
        return Err(malformed("map-key projection does not hold a local projection"));
    };
    let arg = QueryArg {
        name: key.name.clone(),
        ty: key.ty.clone().into_foreign(),
    };
    Ok((arg, *id))
}
