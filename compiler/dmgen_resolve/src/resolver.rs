//! The compilation context: memo, emission table and the resolution phases.

use dmgen_ir::{CodegenConfig, CodegenError, EmitCode, EmitField, EmitMap, EmitVariant, Ident, TypeRef};
use dmgen_ir::{CompareFn, TypeReference};
use dmgen_schema::Schema;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::matcher::builtin;
use crate::shortcuts::enum_shortcuts;
use crate::{EmitPlan, FieldPlan, ResolvedRef};

/// Owns all state of one compilation run.
///
/// The memo is an insertion-ordered vector: materialization walks it by
/// index, so entries added while materializing are visited too.
pub struct Resolver<'a> {
    schema: &'a Schema,
    config: &'a CodegenConfig,
    memo: Vec<(String, ResolvedRef)>,
    memo_index: FxHashMap<String, usize>,
    in_progress: FxHashSet<String>,
    emits: EmitMap,
    /// Key that first materialized each identifier.
    origins: FxHashMap<Ident, String>,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema, config: &'a CodegenConfig) -> Self {
        Self {
            schema,
            config,
            memo: Vec::new(),
            memo_index: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            emits: EmitMap::new(),
            origins: FxHashMap::default(),
        }
    }

    /// Run resolution, materialization and pruning.
    pub fn run(schema: &'a Schema, config: &'a CodegenConfig) -> Result<EmitMap, CodegenError> {
        let mut resolver = Self::new(schema, config);
        resolver.resolve_all()?;
        resolver.materialize_all()?;
        resolver.prune_empty_enums()?;
        Ok(resolver.into_emits())
    }

    pub fn config(&self) -> &CodegenConfig {
        self.config
    }

    pub fn emits(&self) -> &EmitMap {
        &self.emits
    }

    pub fn into_emits(self) -> EmitMap {
        self.emits
    }

    /// Memo entry for `key`, if it has been resolved.
    #[cfg(test)]
    pub(crate) fn resolved(&self, key: &str) -> Option<&ResolvedRef> {
        self.memo_index.get(key).map(|&index| &self.memo[index].1)
    }

    /// Resolve every schema key, in declaration order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve_all(&mut self) -> Result<(), CodegenError> {
        let schema = self.schema;
        for key in schema.keys() {
            self.resolve(key)?;
        }
        debug!(resolved = self.memo.len(), "resolved schema");
        Ok(())
    }

    /// Resolve one canonical reference string, memoized.
    pub fn resolve(&mut self, key: &str) -> Result<TypeRef, CodegenError> {
        if let Some(&index) = self.memo_index.get(key) {
            return Ok(self.memo[index].1.ty.clone());
        }
        if !self.in_progress.insert(key.to_owned()) {
            return Err(CodegenError::RecursiveResolution {
                reference: key.to_owned(),
            });
        }
        let result = self.resolve_uncached(key);
        self.in_progress.remove(key);

        let mut resolved = result?;
        if let TypeRef::Local { id, lazy, .. } = &mut resolved.ty {
            if self.config.is_breakpoint(self.emits.name(*id)) {
                *lazy = true;
            }
        }
        trace!(key, ty = ?resolved.ty, "resolved");

        let ty = resolved.ty.clone();
        self.memoize(key.to_owned(), resolved);
        Ok(ty)
    }

    fn resolve_uncached(&mut self, key: &str) -> Result<ResolvedRef, CodegenError> {
        let schema = self.schema;
        let entry = schema
            .get(key)
            .ok_or_else(|| CodegenError::MissingSchemaEntry {
                reference: key.to_owned(),
            })?;
        let parsed = TypeReference::parse(key);
        let head = parsed.as_ref().map(|r| (r.id(), r.args()));

        if let Some(ty) = builtin(head, key, entry.view()) {
            return Ok(ResolvedRef::plain(ty));
        }
        self.match_shape(head, key, entry.view())
    }

    /// Store `resolved` under `key`; an existing entry is replaced in place.
    pub(crate) fn memoize(&mut self, key: String, resolved: ResolvedRef) {
        if let Some(&index) = self.memo_index.get(&key) {
            self.memo[index].1 = resolved;
        } else {
            self.memo_index.insert(key.clone(), self.memo.len());
            self.memo.push((key, resolved));
        }
    }

    /// Local reference to `name`, interning it.
    pub(crate) fn local(&mut self, name: &str, params: Vec<TypeRef>) -> TypeRef {
        TypeRef::Local {
            id: self.emits.intern(name),
            params,
            lazy: false,
        }
    }

    pub(crate) fn name_of(&self, ident: Ident) -> &str {
        self.emits.name(ident)
    }

    /// Build the shape of every memoized local type.
    ///
    /// A second instantiation of an identifier must produce the same shape
    /// as the first.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn materialize_all(&mut self) -> Result<(), CodegenError> {
        let mut index = 0;
        while index < self.memo.len() {
            let (key, entry) = &self.memo[index];
            if let (TypeRef::Local { id, .. }, Some(plan)) = (&entry.ty, &entry.plan) {
                let (ident, key, plan) = (*id, key.clone(), plan.clone());
                let code = self.materialize(plan)?;
                self.record(ident, key, code)?;
            }
            index += 1;
        }
        debug!(emitted = self.emits.len(), "materialized");
        Ok(())
    }

    fn record(&mut self, ident: Ident, origin: String, code: EmitCode) -> Result<(), CodegenError> {
        match self.emits.get(ident) {
            Some(existing) if *existing == code => Ok(()),
            Some(_) => Err(CodegenError::DivergentInstantiation {
                ident: self.emits.name(ident).to_owned(),
                first: self.origins.get(&ident).cloned().unwrap_or_default(),
                second: origin,
            }),
            None => {
                self.emits.insert(ident, code);
                self.origins.insert(ident, origin);
                Ok(())
            }
        }
    }

    fn materialize(&mut self, plan: EmitPlan) -> Result<EmitCode, CodegenError> {
        match plan {
            EmitPlan::Ready(code) => Ok(code),
            EmitPlan::Struct(plans) => {
                let fields = plans
                    .into_iter()
                    .map(|field| self.materialize_field(field))
                    .collect::<Result<_, _>>()?;
                Ok(EmitCode::Struct { fields })
            }
            EmitPlan::Enum(raw) => {
                let variants = raw
                    .iter()
                    .map(|variant| self.map_variant(variant))
                    .collect::<Result<_, _>>()?;
                Ok(EmitCode::Enum { variants })
            }
            EmitPlan::Alias {
                target,
                flatten_result,
            } => match self.resolve(&target)? {
                TypeRef::Result { ok, err } if flatten_result => Ok(EmitCode::Enum {
                    variants: vec![
                        EmitVariant {
                            tag: "Ok".into(),
                            discriminant: 0,
                            ty: *ok,
                        },
                        EmitVariant {
                            tag: "Err".into(),
                            discriminant: 1,
                            ty: *err,
                        },
                    ],
                }),
                to => Ok(EmitCode::Alias { to }),
            },
            EmitPlan::PermissionSet { element } => {
                let elem = self.resolve(&element)?;
                Ok(EmitCode::Alias {
                    to: TypeRef::SetWithCmp {
                        elem: Box::new(elem),
                        compare: CompareFn::NameThenPayload,
                    },
                })
            }
        }
    }

    fn materialize_field(&mut self, plan: FieldPlan) -> Result<EmitField, CodegenError> {
        match plan {
            FieldPlan::Param { name, index } => Ok(EmitField {
                name,
                ty: TypeRef::Param(index),
            }),
            FieldPlan::Resolve { name, path } => {
                let ty = self.resolve(&path)?;
                Ok(EmitField { name, ty })
            }
            FieldPlan::Mapped(field) => self.map_field(&field),
        }
    }

    /// Replace every enum without shortcuts by a zero-variant enum.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn prune_empty_enums(&mut self) -> Result<(), CodegenError> {
        // An empty enum contributes nothing to any other enum's shortcuts, so
        // deciding all of them before rewriting gives the same result.
        let mut empty = Vec::new();
        for (ident, code) in self.emits.iter() {
            if let EmitCode::Enum { variants } = code {
                if !variants.is_empty() && enum_shortcuts(variants, &self.emits)?.is_empty() {
                    empty.push(ident);
                }
            }
        }
        debug!(pruned = empty.len(), "pruned empty enums");
        for ident in empty {
            self.emits.insert(ident, EmitCode::Enum { variants: Vec::new() });
        }
        Ok(())
    }
}
