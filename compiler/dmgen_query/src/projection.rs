//! Projections of every iterable query.

use dmgen_ir::{CodegenConfig, CodegenError, EmitMap, EmitVariant, Ident, LibType, TypeRef};
use tracing::debug;

use crate::lookup::enum_variants_named;
use crate::{predicate_tree, selector_tree, PredicateTree, SelectorTree};

/// Predicate and selector trees of one query box variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryProjection {
    /// Query box tag, e.g. `FindAccounts`.
    pub query: String,
    pub predicate: PredicateTree,
    pub selector: SelectorTree,
    /// Selector ids, in tree order, without duplicates.
    pub selector_ids: Vec<String>,
    /// Output of each selector id, in tree order.
    pub selector_outputs: Vec<(String, TypeRef)>,
}

/// Projections of the whole query box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryProjections {
    pub queries: Vec<QueryProjection>,
    /// Selector outputs merged across queries, first occurrence order.
    pub outputs: Vec<(String, TypeRef)>,
}

/// The three generic arguments of `QueryWithFilter`.
pub(crate) struct QueryParts<'a> {
    pub(crate) payload: &'a TypeRef,
    pub(crate) predicate: Ident,
    pub(crate) selector: Ident,
}

impl<'a> QueryParts<'a> {
    /// Destructure `QueryWithFilter<payload, CompoundPredicate<P>, Vec<S>>`.
    pub(crate) fn of(emits: &EmitMap, variant: &'a EmitVariant) -> Result<Self, CodegenError> {
        let malformed = |reason: &str| {
            CodegenError::malformed_query(variant.tag.as_str(), format!("query box variant {reason}"))
        };
        let TypeRef::Local { id, params, .. } = &variant.ty else {
            return Err(malformed("does not hold a local type"));
        };
        if emits.name(*id) != "QueryWithFilter" {
            return Err(malformed("does not hold `QueryWithFilter`"));
        }
        match params.as_slice() {
            [payload, TypeRef::Lib {
                id: LibType::CompoundPredicate,
                params: predicate,
            }, TypeRef::Lib {
                id: LibType::Vec,
                params: selector,
            }] => match (predicate.as_slice(), selector.as_slice()) {
                ([TypeRef::Local { id: predicate, .. }], [TypeRef::Local { id: selector, .. }]) => {
                    Ok(QueryParts {
                        payload,
                        predicate: *predicate,
                        selector: *selector,
                    })
                }
                _ => Err(malformed("has non-local projections")),
            },
            _ => Err(malformed("is not filtered by a compound predicate and a selector tuple")),
        }
    }
}

impl QueryProjection {
    fn build(
        emits: &EmitMap,
        config: &CodegenConfig,
        variant: &EmitVariant,
    ) -> Result<Self, CodegenError> {
        let parts = QueryParts::of(emits, variant)?;
        let selector = selector_tree(emits, config, parts.selector)?;
        let predicate = predicate_tree(emits, config, parts.predicate)?;

        let mut selector_ids: Vec<String> = Vec::new();
        for id in selector.ids() {
            if !selector_ids.iter().any(|seen| seen == id) {
                selector_ids.push(id.to_owned());
            }
        }
        let mut selector_outputs: Vec<(String, TypeRef)> = Vec::new();
        for (id, output) in selector.outputs() {
            match selector_outputs.iter_mut().find(|(seen, _)| seen == id) {
                Some(slot) => slot.1 = output.clone(),
                None => selector_outputs.push((id.to_owned(), output.clone())),
            }
        }

        Ok(QueryProjection {
            query: variant.tag.clone(),
            predicate,
            selector,
            selector_ids,
            selector_outputs,
        })
    }
}

impl QueryProjections {
    /// Build the projections of every variant of the query box.
    ///
    /// The same selector id must yield the same output in every query.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(emits: &EmitMap, config: &CodegenConfig) -> Result<Self, CodegenError> {
        let variants = enum_variants_named(emits, &config.query_box)?;
        let queries = variants
            .iter()
            .map(|variant| QueryProjection::build(emits, config, variant))
            .collect::<Result<Vec<_>, _>>()?;

        let mut outputs: Vec<(String, TypeRef)> = Vec::new();
        for (id, output) in queries.iter().flat_map(|q| &q.selector_outputs) {
            match outputs.iter().find(|(seen, _)| seen == id) {
                Some((_, existing)) if existing != output => {
                    return Err(CodegenError::DivergentSelectorOutput { id: id.clone() });
                }
                Some(_) => {}
                None => outputs.push((id.clone(), output.clone())),
            }
        }

        debug!(queries = queries.len(), selectors = outputs.len(), "built query projections");
        Ok(QueryProjections { queries, outputs })
    }
}
