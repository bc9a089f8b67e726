//! Queries exposed through the client's convenience API.

use dmgen_ir::{CodegenConfig, CodegenError, EmitMap, EmitVariant, TypeRef};
use heck::ToLowerCamelCase;

use crate::lookup::enum_variants_named;
use crate::projection::QueryParts;

/// Query box variant: `tag` is `Find...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterableQuery {
    pub tag: String,
    /// `tag` without `Find`, in lower camel case.
    pub method: String,
    /// Payload type name; `None` for payload-less queries.
    pub payload: Option<String>,
}

/// Singular query box variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingularQuery {
    pub tag: String,
    pub method: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindQueries {
    pub iterable: Vec<IterableQuery>,
    pub singular: Vec<SingularQuery>,
}

impl FindQueries {
    /// Collect both query boxes.
    pub fn collect(emits: &EmitMap, config: &CodegenConfig) -> Result<Self, CodegenError> {
        let iterable = enum_variants_named(emits, &config.query_box)?
            .iter()
            .map(|variant| {
                let parts = QueryParts::of(emits, variant)?;
                let payload = match parts.payload {
                    TypeRef::Null => None,
                    TypeRef::Lib { id, .. } => Some(id.name().to_owned()),
                    TypeRef::Local { id, .. } => Some(emits.name(*id).to_owned()),
                    _ => {
                        return Err(CodegenError::malformed_query(
                            variant.tag.as_str(),
                            "unexpected query payload",
                        ))
                    }
                };
                Ok(IterableQuery {
                    tag: variant.tag.clone(),
                    method: method_name(variant)?,
                    payload,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let singular = enum_variants_named(emits, &config.singular_query_box)?
            .iter()
            .map(|variant| {
                Ok(SingularQuery {
                    tag: variant.tag.clone(),
                    method: method_name(variant)?,
                })
            })
            .collect::<Result<Vec<_>, CodegenError>>()?;

        Ok(FindQueries { iterable, singular })
    }
}

fn method_name(variant: &EmitVariant) -> Result<String, CodegenError> {
    variant
        .tag
        .strip_prefix("Find")
        .map(str::to_lower_camel_case)
        .ok_or_else(|| CodegenError::malformed_query(variant.tag.as_str(), "query tag does not start with `Find`"))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use dmgen_ir::EmitCode;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn method_names_drop_find() {
        let variant = EmitVariant {
            tag: "FindAccountsWithAsset".into(),
            discriminant: 0,
            ty: TypeRef::Null,
        };
        assert_eq!(method_name(&variant).unwrap(), "accountsWithAsset");
    }

    #[test]
    fn singular_tags_need_find_prefix() {
        let mut map = EmitMap::new();
        map.insert_named("QueryBox", EmitCode::Enum { variants: vec![] });
        map.insert_named(
            "SingularQueryBox",
            EmitCode::Enum {
                variants: vec![EmitVariant {
                    tag: "GetParameters".into(),
                    discriminant: 0,
                    ty: TypeRef::Null,
                }],
            },
        );

        let err = FindQueries::collect(&map, &CodegenConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CodegenError::MalformedQuery {
                ident: "GetParameters".into(),
                reason: "query tag does not start with `Find`".into(),
            }
        );
    }
}
