//! Shape rules: which resolved reference a schema entry becomes.
//!
//! Rules are tried in order and the first match wins. Order is the arm order
//! of [`Resolver::match_shape`]; specific names come before the catch-all
//! struct, enum and alias rules. A schema entry matching no rule means the
//! schema comes from an incompatible release.

use dmgen_ir::{BitMask, CodegenError, EmitCode, EmitField, LibType, TypeRef, TypeReference};
use dmgen_schema::ShapeView;

use crate::{EmitPlan, FieldPlan, ResolvedRef, Resolver};

/// Reference head: identifier and generic arguments.
pub(crate) type Head<'r> = Option<(&'r str, &'r [TypeReference])>;

/// Library scalars, checked before any shape rule.
pub(crate) fn builtin(head: Head<'_>, key: &str, shape: ShapeView<'_>) -> Option<TypeRef> {
    if key == "()" || matches!(head, Some(("MerkleTree", [_]))) {
        // MerkleTree is declared but never used by the data model.
        return Some(TypeRef::Null);
    }
    if key == "bool" {
        return Some(TypeRef::lib(LibType::Bool));
    }
    if let Some(lib) = head.and_then(|(id, _)| LibType::from_direct_name(id)) {
        return Some(TypeRef::lib(lib));
    }
    if let ShapeView::Int("FixedWidth") = shape {
        return LibType::from_int_name(key).map(TypeRef::lib);
    }
    None
}

fn param(name: &str, index: u32) -> FieldPlan {
    FieldPlan::Param {
        name: name.to_owned(),
        index,
    }
}

fn mismatch(key: &str, reason: impl Into<String>) -> CodegenError {
    CodegenError::unexpected_shape(key, reason)
}

impl Resolver<'_> {
    /// Local type `name` with a plan.
    fn declare(&mut self, name: &str, params: Vec<TypeRef>, plan: EmitPlan) -> ResolvedRef {
        ResolvedRef::with_plan(self.local(name, params), plan)
    }

    fn resolve_each<'s>(
        &mut self,
        paths: impl IntoIterator<Item = &'s str>,
    ) -> Result<Vec<TypeRef>, CodegenError> {
        paths.into_iter().map(|path| self.resolve(path)).collect()
    }

    pub(crate) fn match_shape(
        &mut self,
        head: Head<'_>,
        key: &str,
        shape: ShapeView<'_>,
    ) -> Result<ResolvedRef, CodegenError> {
        match (head, key, shape) {
            (_, "Uptime", ShapeView::Tuple([secs, nanos])) if secs == "Compact<u64>" && nanos == "u32" => {
                let code = EmitCode::Struct {
                    fields: vec![
                        EmitField {
                            name: "secs".into(),
                            ty: TypeRef::lib(LibType::Compact),
                        },
                        EmitField {
                            name: "nanos".into(),
                            ty: TypeRef::lib(LibType::U32),
                        },
                    ],
                };
                Ok(self.declare(key, Vec::new(), EmitPlan::Ready(code)))
            }

            (Some(("Register" | "Unregister", [_])), _, ShapeView::Struct([object]))
                if object.name == "object" =>
            {
                Ok(ResolvedRef::plain(self.resolve(&object.ty)?))
            }

            // Mutation boxes keep the object generic; the other fields are
            // resolved as declared by each instantiation.
            (Some((id @ ("SetKeyValue" | "RemoveKeyValue"), [_])), _, ShapeView::Struct([object, rest @ ..]))
                if object.name == "object" =>
            {
                let params = vec![self.resolve(&object.ty)?];
                let mut fields = vec![param("object", 0)];
                fields.extend(rest.iter().map(|field| FieldPlan::Resolve {
                    name: field.name.clone(),
                    path: field.ty.clone(),
                }));
                Ok(self.declare(id, params, EmitPlan::Struct(fields)))
            }

            (
                Some((id @ ("Mint" | "Burn" | "Grant" | "Revoke"), [_, _])),
                _,
                ShapeView::Struct([object, destination]),
            ) if object.name == "object" && destination.name == "destination" => {
                let params = self.resolve_each([object.ty.as_str(), destination.ty.as_str()])?;
                let fields = vec![param("object", 0), param("destination", 1)];
                Ok(self.declare(id, params, EmitPlan::Struct(fields)))
            }

            (Some(("Transfer", [_, _, _])), _, ShapeView::Struct(fields @ [source, object, destination]))
                if source.name == "source" && object.name == "object" && destination.name == "destination" =>
            {
                let params = self.resolve_each(fields.iter().map(|f| f.ty.as_str()))?;
                let plans = (0..).zip(fields).map(|(i, f)| param(&f.name, i)).collect();
                Ok(self.declare("Transfer", params, EmitPlan::Struct(plans)))
            }

            (Some(("QueryWithFilter", [generic])), _, ShapeView::Struct(fields @ [query, predicate, selector]))
                if query.name == "query" && predicate.name == "predicate" && selector.name == "selector" =>
            {
                if TypeReference::parse(&query.ty).as_ref() != Some(generic) {
                    return Err(mismatch(key, "query field differs from the generic argument"));
                }
                let params = self.resolve_each(fields.iter().map(|f| f.ty.as_str()))?;
                let plans = (0..).zip(fields).map(|(i, f)| param(&f.name, i)).collect();
                Ok(self.declare("QueryWithFilter", params, EmitPlan::Struct(plans)))
            }

            (Some((id, [marker])), _, shape)
                if marker.args().is_empty() && matches!(marker.id(), "PredicateMarker" | "SelectorMarker") =>
            {
                let suffix = marker.id().strip_suffix("Marker").unwrap_or(marker.id());
                let name = format!("{id}{suffix}");
                let plan = match shape {
                    ShapeView::Struct(fields) => {
                        EmitPlan::Struct(fields.iter().cloned().map(FieldPlan::Mapped).collect())
                    }
                    ShapeView::Enum(variants) => EmitPlan::Enum(variants.to_vec()),
                    _ => return Err(mismatch(key, "projection is neither a struct nor an enum")),
                };
                Ok(self.declare(&name, Vec::new(), plan))
            }

            (Some(("MetadataChanged", [_])), _, ShapeView::Struct([target, meta_key, value]))
                if target.name == "target" && meta_key.name == "key" && value.name == "value" =>
            {
                let params = vec![self.resolve(&target.ty)?];
                let fields = vec![
                    param("target", 0),
                    FieldPlan::Mapped(meta_key.clone()),
                    FieldPlan::Mapped(value.clone()),
                ];
                Ok(self.declare("MetadataChanged", params, EmitPlan::Struct(fields)))
            }

            (Some(("SelectorTuple", [_])), _, ShapeView::Alias(target)) => {
                Ok(ResolvedRef::plain(self.resolve(target)?))
            }

            (Some(("CompoundPredicate", [_])), _, ShapeView::Enum([atom, not, and, or]))
                if atom.tag == "Atom" && not.tag == "Not" && and.tag == "And" && or.tag == "Or" =>
            {
                let (Some(atom_ty), Some(not_ty), Some(and_ty)) = (&atom.ty, &not.ty, &and.ty) else {
                    return Err(mismatch(key, "compound predicate variants need payloads"));
                };
                if not_ty != key {
                    return Err(mismatch(key, "`Not` must wrap the predicate itself"));
                }
                if or.ty.as_ref() != Some(and_ty) {
                    return Err(mismatch(key, "`And` and `Or` payloads differ"));
                }
                let expected = head.map(|(id, args)| {
                    TypeReference::new("Vec", vec![TypeReference::new(id, args.to_vec())])
                });
                if TypeReference::parse(and_ty) != expected {
                    return Err(mismatch(key, "`And` must hold a vector of the predicate"));
                }
                let atom = self.resolve(atom_ty)?;
                Ok(ResolvedRef::plain(TypeRef::lib_with(LibType::CompoundPredicate, vec![atom])))
            }

            (Some(("Mismatch", [_])), _, ShapeView::Struct([expected, actual]))
                if expected.name == "expected" && actual.name == "actual" =>
            {
                if expected.ty != actual.ty {
                    return Err(mismatch(key, "`expected` and `actual` types differ"));
                }
                let params = vec![self.resolve(&expected.ty)?];
                let fields = vec![param("expected", 0), param("actual", 0)];
                Ok(self.declare("Mismatch", params, EmitPlan::Struct(fields)))
            }

            (Some((ip @ ("Ipv4Addr" | "Ipv6Addr"), [])), _, ShapeView::Alias(array)) => {
                let elements = match self.resolve(array)? {
                    TypeRef::Array { len: len @ (4 | 8), elem }
                        if elem.is_lib(LibType::U8) || elem.is_lib(LibType::U16) =>
                    {
                        let len = usize::try_from(len).unwrap_or_default();
                        vec![*elem; len]
                    }
                    _ => return Err(mismatch(key, "address is not an array of 4 or 8 integers")),
                };
                Ok(self.declare(ip, Vec::new(), EmitPlan::Ready(EmitCode::Tuple { elements })))
            }

            (Some(("SignatureOf", [_])), _, ShapeView::Alias("Signature"))
            | (_, "TransactionSignature" | "QuerySignature", _) => {
                Ok(ResolvedRef::plain(TypeRef::lib(LibType::Signature)))
            }

            (Some(("HashOf", [_])), _, ShapeView::Alias("Hash")) => {
                Ok(ResolvedRef::plain(TypeRef::lib(LibType::Hash)))
            }

            (Some(("MerkleProof", [_])), _, ShapeView::Struct(fields @ [_, _])) => {
                let plans = fields.iter().cloned().map(FieldPlan::Mapped).collect();
                Ok(self.declare("MerkleProof", Vec::new(), EmitPlan::Struct(plans)))
            }

            (_, name @ ("Hash" | "PublicKey" | "Signature"), _) => {
                let lib = match name {
                    "Hash" => LibType::Hash,
                    "PublicKey" => LibType::PublicKey,
                    _ => LibType::Signature,
                };
                Ok(ResolvedRef::plain(TypeRef::lib(lib)))
            }

            (_, "FetchSize", ShapeView::Struct([field])) if field.name == "fetch_size" => {
                Ok(ResolvedRef::plain(self.resolve(&field.ty)?))
            }

            (_, "BlockSubscriptionRequest", ShapeView::Alias(target @ "NonZero<u64>")) => {
                let fields = vec![FieldPlan::Resolve {
                    name: "from_block_height".into(),
                    path: target.to_owned(),
                }];
                Ok(self.declare(key, Vec::new(), EmitPlan::Struct(fields)))
            }

            (_, "EventSubscriptionRequest", ShapeView::Alias(target)) => {
                let filters = self.resolve(target)?;
                if !matches!(filters, TypeRef::Lib { id: LibType::Vec, .. }) {
                    return Err(mismatch(key, "filters are not a vector"));
                }
                let code = EmitCode::Struct {
                    fields: vec![EmitField {
                        name: "filters".into(),
                        ty: filters,
                    }],
                };
                Ok(self.declare(key, Vec::new(), EmitPlan::Ready(code)))
            }

            (_, "QueryOutputBatchBoxTuple", ShapeView::Struct([field])) if field.name == "tuple" => {
                let plan = EmitPlan::Alias {
                    target: field.ty.clone(),
                    flatten_result: false,
                };
                Ok(self.declare(key, Vec::new(), plan))
            }

            (Some((id, [])), _, ShapeView::Struct([field])) if field.name == "name" && field.ty == "Name" => {
                let code = EmitCode::Alias {
                    to: TypeRef::lib(LibType::Name),
                };
                Ok(self.declare(id, Vec::new(), EmitPlan::Ready(code)))
            }

            (Some((id, [])), _, ShapeView::Bitmap { repr: "u32", masks }) => {
                let masks = masks
                    .iter()
                    .map(|m| BitMask {
                        name: m.name.clone(),
                        mask: m.mask,
                    })
                    .collect();
                let code = EmitCode::Bitmap {
                    repr: LibType::U32,
                    masks,
                };
                Ok(self.declare(id, Vec::new(), EmitPlan::Ready(code)))
            }

            (Some(("Option", [_])), _, ShapeView::Option(inner)) => {
                let inner = self.resolve(inner)?;
                Ok(ResolvedRef::plain(TypeRef::lib_with(LibType::Option, vec![inner])))
            }

            (Some(("SortedVec", [element])), _, _) if element.id() == "Permission" => {
                let plan = EmitPlan::PermissionSet {
                    element: "Permission".into(),
                };
                Ok(self.declare("PermissionsSet", Vec::new(), plan))
            }

            (Some(("Vec", [element])), _, _) if element.id() == "u8" => {
                Ok(ResolvedRef::plain(TypeRef::lib(LibType::BytesVec)))
            }

            (Some((id @ ("Vec" | "SortedVec"), [_])), _, ShapeView::Vec(inner)) => {
                let lib = if id == "SortedVec" { LibType::BTreeSet } else { LibType::Vec };
                let inner = self.resolve(inner)?;
                Ok(ResolvedRef::plain(TypeRef::lib_with(lib, vec![inner])))
            }

            (Some(("Array", [_, _])), _, ShapeView::Array { len, ty }) => {
                let elem = self.resolve(ty)?;
                Ok(ResolvedRef::plain(TypeRef::Array {
                    len,
                    elem: Box::new(elem),
                }))
            }

            (Some(("SortedMap", [_, _])), _, ShapeView::Map { key: k, value }) => {
                let params = self.resolve_each([k, value])?;
                Ok(ResolvedRef::plain(TypeRef::lib_with(LibType::BTreeMap, params)))
            }

            (Some((id, [])), _, ShapeView::Struct(fields)) => {
                let plans = fields.iter().cloned().map(FieldPlan::Mapped).collect();
                Ok(self.declare(id, Vec::new(), EmitPlan::Struct(plans)))
            }

            (Some((id, [])), _, ShapeView::Enum(variants)) => {
                Ok(self.declare(id, Vec::new(), EmitPlan::Enum(variants.to_vec())))
            }

            (Some(("NonZero", [int])), _, ShapeView::Alias(target)) if int.args().is_empty() => {
                if int.id() != target {
                    return Err(mismatch(key, "non-zero wrapper aliases a different integer"));
                }
                let inner = self.resolve(target)?;
                Ok(ResolvedRef::plain(TypeRef::lib_with(LibType::NonZero, vec![inner])))
            }

            (_, _, ShapeView::Result { ok, err }) => {
                let ok = self.resolve(ok)?;
                let err = self.resolve(err)?;
                Ok(ResolvedRef::plain(TypeRef::Result {
                    ok: Box::new(ok),
                    err: Box::new(err),
                }))
            }

            (Some((id, [])), _, ShapeView::Alias(target)) => {
                let plan = EmitPlan::Alias {
                    target: target.to_owned(),
                    flatten_result: true,
                };
                Ok(self.declare(id, Vec::new(), plan))
            }

            (_, _, ShapeView::Unit) => Ok(ResolvedRef::plain(TypeRef::Null)),

            _ => Err(match TypeReference::parse_detailed(key) {
                Err(err) => CodegenError::unexpected_shape(key, format!("unparseable reference: {err}")),
                Ok(_) => CodegenError::NoRuleMatched {
                    reference: key.to_owned(),
                },
            }),
        }
    }
}
