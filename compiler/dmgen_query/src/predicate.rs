//! Predicate trees.
//!
//! A predicate projection enum has an `Atom` variant first; the atom's own
//! enum lists the predicates on the current value (`Equals(value)`,
//! `IsEmpty`, ...). Every later variant projects into a field with a
//! projection of its own. The tree flattens this into nested objects of
//! predicate functions, each returning the root predicate type.

use dmgen_ir::{ensure_sufficient_stack, CodegenConfig, CodegenError, EmitMap, Ident, TypeRef};
use heck::ToLowerCamelCase;

use crate::lookup::{enum_variants, is_key_projection, key_projection, local_payload};
use crate::QueryArg;

/// Predicate functions and nested field trees, in variant order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredicateTree {
    entries: Vec<(String, PredicateEntry)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredicateEntry {
    /// Field projection.
    Nested(PredicateTree),
    /// Predicate function, or a map lookup taking the key.
    Fn {
        args: Vec<QueryArg>,
        out: PredicateOutput,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredicateOutput {
    Nested(PredicateTree),
    /// A complete predicate of this type.
    Final(TypeRef),
}

impl PredicateTree {
    pub fn entries(&self) -> &[(String, PredicateEntry)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&PredicateEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Later entries with the same name replace earlier ones in place.
    fn insert(&mut self, name: String, entry: PredicateEntry) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name, entry)),
        }
    }
}

/// Predicate tree of the projection enum `ident`.
///
/// Every function in the tree yields a predicate on `ident` itself.
pub fn predicate_tree(
    emits: &EmitMap,
    config: &CodegenConfig,
    ident: Ident,
) -> Result<PredicateTree, CodegenError> {
    let name = emits.name(ident);
    if !name.ends_with(&config.predicate_suffix) {
        return Err(CodegenError::malformed_query(
            name,
            format!("predicate name does not end with `{}`", config.predicate_suffix),
        ));
    }
    let mut builder = Builder {
        emits,
        config,
        start: ident,
        path: Vec::new(),
    };
    builder.build(ident)
}

struct Builder<'a> {
    emits: &'a EmitMap,
    config: &'a CodegenConfig,
    start: Ident,
    /// Projections on the current path.
    path: Vec<Ident>,
}

impl Builder<'_> {
    fn build(&mut self, ident: Ident) -> Result<PredicateTree, CodegenError> {
        if self.path.contains(&ident) {
            return Err(CodegenError::malformed_query(
                self.emits.name(ident),
                "projection refers to itself",
            ));
        }
        self.path.push(ident);
        let tree = ensure_sufficient_stack(|| self.build_variants(ident));
        self.path.pop();
        tree
    }

    fn build_variants(&mut self, ident: Ident) -> Result<PredicateTree, CodegenError> {
        let emits = self.emits;
        let mut tree = PredicateTree::default();
        let Some((atom, delegates)) = enum_variants(emits, ident)?.split_first() else {
            return Ok(tree);
        };
        if atom.tag != "Atom" {
            return Err(CodegenError::malformed_query(
                emits.name(ident),
                format!("first variant is `{}`, not `Atom`", atom.tag),
            ));
        }

        let atom_enum = local_payload(emits, ident, atom)?;
        for predicate in enum_variants(emits, atom_enum)? {
            let args = match &predicate.ty {
                TypeRef::Null => Vec::new(),
                ty => vec![QueryArg {
                    name: "value".into(),
                    ty: ty.clone().into_foreign(),
                }],
            };
            let out = PredicateOutput::Final(TypeRef::Foreign {
                id: self.start,
                params: Vec::new(),
            });
            tree.insert(predicate.tag.to_lower_camel_case(), PredicateEntry::Fn { args, out });
        }

        for delegate in delegates {
            let target = local_payload(emits, ident, delegate)?;
            let entry = if is_key_projection(emits, self.config, target) {
                let (key, projection) = key_projection(emits, target)?;
                PredicateEntry::Fn {
                    args: vec![key],
                    out: PredicateOutput::Nested(self.build(projection)?),
                }
            } else {
                PredicateEntry::Nested(self.build(target)?)
            };
            tree.insert(delegate.tag.to_lower_camel_case(), entry);
        }
        Ok(tree)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
