//! Field and variant rewrites applied while materializing shapes.
//!
//! - `*_ms` fields hold milliseconds: the suffix is dropped and the integer
//!   becomes a `Duration`, or a `Timestamp` for the configured fields.
//! - An `errors` map of transaction rejection reasons becomes a set of
//!   `TransactionErrorWithIndex`, ordered by index.
//! - `*Ms` enum variants with a `u64` payload become `Duration` variants.

use dmgen_ir::{CodegenError, CompareFn, EmitCode, EmitField, EmitVariant, LibType, TypeRef};
use dmgen_schema::{EnumVariant, StructField};
use tracing::warn;

use crate::{EmitPlan, ResolvedRef, Resolver};

const ERROR_WITH_INDEX: &str = "TransactionErrorWithIndex";
const TRANSACTION_ERRORS: &str = "TransactionErrors";
const REJECTION_REASON: &str = "TransactionRejectionReason";

fn is_nonzero_u64(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Lib {
            id: LibType::NonZero,
            params,
        } => matches!(params.as_slice(), [p] if p.is_lib(LibType::U64)),
        _ => false,
    }
}

impl Resolver<'_> {
    pub(crate) fn map_field(&mut self, field: &StructField) -> Result<EmitField, CodegenError> {
        if let Some(name) = field.name.strip_suffix("_ms") {
            let ty = self.rewrite_millis(field)?;
            return Ok(EmitField {
                name: name.to_owned(),
                ty,
            });
        }
        if field.name == "errors" && field.ty.contains(REJECTION_REASON) {
            return self.transaction_errors(field);
        }
        Ok(EmitField {
            name: field.name.clone(),
            ty: self.resolve(&field.ty)?,
        })
    }

    fn rewrite_millis(&mut self, field: &StructField) -> Result<TypeRef, CodegenError> {
        let timestamp = self.config().is_timestamp_field(&field.name);
        let target = if timestamp {
            LibType::Timestamp
        } else {
            LibType::Duration
        };

        let resolved = self.resolve(&field.ty)?;
        match &resolved {
            TypeRef::Lib { id: LibType::U64, .. } => Ok(TypeRef::lib(target)),
            ty if timestamp && is_nonzero_u64(ty) => {
                warn!(
                    field = %field.name,
                    "timestamp field is declared as NonZero<u64>; rewriting it as Timestamp"
                );
                Ok(TypeRef::lib(target))
            }
            TypeRef::Lib {
                id: wrapper @ (LibType::Option | LibType::NonZero),
                params,
            } if matches!(params.as_slice(), [p] if p.is_lib(LibType::U64)) => {
                Ok(TypeRef::lib_with(*wrapper, vec![TypeRef::lib(target)]))
            }
            TypeRef::Lib {
                id: LibType::Option,
                params,
            } if !timestamp && matches!(params.as_slice(), [p] if is_nonzero_u64(p)) => {
                let nonzero = TypeRef::lib_with(LibType::NonZero, vec![TypeRef::lib(target)]);
                Ok(TypeRef::lib_with(LibType::Option, vec![nonzero]))
            }
            ty if !timestamp && ty.is_lib(LibType::Compact) => Ok(TypeRef::lib(LibType::DurationCompact)),
            _ => Err(CodegenError::unexpected_shape(
                &field.ty,
                format!("`{}` holds milliseconds but is not an integer", field.name),
            )),
        }
    }

    /// `errors: SortedMap<u64, TransactionRejectionReason>` becomes a set of
    /// indexed errors, introducing two local types.
    fn transaction_errors(&mut self, field: &StructField) -> Result<EmitField, CodegenError> {
        let resolved = self.resolve(&field.ty)?;
        let (index, error) = match &resolved {
            TypeRef::Lib {
                id: LibType::BTreeMap,
                params,
            } => match params.as_slice() {
                [index, error @ TypeRef::Local { id, .. }]
                    if index.is_lib(LibType::U64) && self.name_of(*id) == REJECTION_REASON =>
                {
                    (index.clone(), error.clone())
                }
                _ => return Err(CodegenError::unexpected_shape(&field.ty, "unexpected errors map")),
            },
            _ => return Err(CodegenError::unexpected_shape(&field.ty, "errors are not a map")),
        };

        let with_index = self.local(ERROR_WITH_INDEX, Vec::new());
        let entry = EmitCode::Struct {
            fields: vec![
                EmitField {
                    name: "index".into(),
                    ty: index,
                },
                EmitField {
                    name: "error".into(),
                    ty: error,
                },
            ],
        };
        self.memoize(
            ERROR_WITH_INDEX.to_owned(),
            ResolvedRef::with_plan(with_index.clone(), EmitPlan::Ready(entry)),
        );

        let errors = self.local(TRANSACTION_ERRORS, Vec::new());
        let set = EmitCode::Alias {
            to: TypeRef::SetWithCmp {
                elem: Box::new(with_index),
                compare: CompareFn::ByIndex,
            },
        };
        self.memoize(
            TRANSACTION_ERRORS.to_owned(),
            ResolvedRef::with_plan(errors.clone(), EmitPlan::Ready(set)),
        );

        Ok(EmitField {
            name: field.name.clone(),
            ty: errors,
        })
    }

    pub(crate) fn map_variant(&mut self, variant: &EnumVariant) -> Result<EmitVariant, CodegenError> {
        if let Some(tag) = variant.tag.strip_suffix("Ms") {
            if variant.ty.as_deref() != Some("u64") {
                return Err(CodegenError::unexpected_shape(
                    &variant.tag,
                    "millisecond variant must hold a u64",
                ));
            }
            return Ok(EmitVariant {
                tag: tag.to_owned(),
                discriminant: variant.discriminant,
                ty: TypeRef::lib(LibType::Duration),
            });
        }
        let ty = match &variant.ty {
            Some(path) => self.resolve(path)?,
            None => TypeRef::Null,
        };
        Ok(EmitVariant {
            tag: variant.tag.clone(),
            discriminant: variant.discriminant,
            ty,
        })
    }
}
