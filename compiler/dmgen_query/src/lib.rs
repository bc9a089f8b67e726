//! dmgen queries: predicate and selector trees.
//!
//! Every iterable query is a variant of the query box holding
//! `QueryWithFilter<Payload, CompoundPredicate<P>, Vec<S>>`. `P` and `S` are
//! projection enums mirroring the queried type field by field. This crate
//! turns them into two trees per query:
//!
//! - [`PredicateTree`]: for every reachable field path, the predicate
//!   functions that can be applied there.
//! - [`SelectorTree`]: every selectable field path, with a stable id and the
//!   type the selection yields.
//!
//! Both are built from the materialized [`EmitMap`](dmgen_ir::EmitMap) only.
//! [`QueryProjections::build`] does it for the whole query box;
//! [`FindQueries::collect`] lists the queries for the client convenience
//! API.

mod find;
mod lookup;
mod predicate;
mod projection;
mod selector;

pub use find::{FindQueries, IterableQuery, SingularQuery};
pub use predicate::{predicate_tree, PredicateEntry, PredicateOutput, PredicateTree};
pub use projection::{QueryProjection, QueryProjections};
pub use selector::{selector_tree, SelectorChild, SelectorTree};

use dmgen_ir::TypeRef;

/// Named argument of a tree function (`value`, or a map-key field).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryArg {
    pub name: String,
    pub ty: TypeRef,
}
