use dmgen_ir::{EmitCode, EmitVariant, LibType};
use dmgen_resolve::Resolver;
use dmgen_schema::Schema;
use pretty_assertions::assert_eq;

use super::*;

const SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/schema.json"));

fn sample() -> EmitMap {
    let schema = Schema::from_json_str(SCHEMA).unwrap();
    Resolver::run(&schema, &CodegenConfig::default()).unwrap()
}

fn tree(entries: Vec<(&str, PredicateEntry)>) -> PredicateTree {
    PredicateTree {
        entries: entries.into_iter().map(|(n, e)| (n.to_owned(), e)).collect(),
    }
}

fn value_fn(ty: TypeRef, start: Ident) -> PredicateEntry {
    PredicateEntry::Fn {
        args: vec![QueryArg {
            name: "value".into(),
            ty,
        }],
        out: final_out(start),
    }
}

fn final_out(start: Ident) -> PredicateOutput {
    PredicateOutput::Final(TypeRef::Foreign {
        id: start,
        params: vec![],
    })
}

#[test]
fn account_predicates() {
    let emits = sample();
    let start = emits.ident("AccountProjectionPredicate").unwrap();
    let lib = TypeRef::lib;

    let actual = predicate_tree(&emits, &CodegenConfig::default(), start).unwrap();

    let name = tree(vec![
        ("equals", value_fn(lib(LibType::String), start)),
        ("contains", value_fn(lib(LibType::String), start)),
        (
            "isEmpty",
            PredicateEntry::Fn {
                args: vec![],
                out: final_out(start),
            },
        ),
    ]);
    let domain_id = tree(vec![
        ("equals", value_fn(lib(LibType::DomainId), start)),
        ("name", PredicateEntry::Nested(name)),
    ]);
    let account_id = tree(vec![
        ("equals", value_fn(lib(LibType::AccountId), start)),
        ("domain", PredicateEntry::Nested(domain_id)),
    ]);
    let metadata = tree(vec![(
        "key",
        PredicateEntry::Fn {
            args: vec![QueryArg {
                name: "key".into(),
                ty: lib(LibType::Name),
            }],
            out: PredicateOutput::Nested(tree(vec![("equals", value_fn(lib(LibType::Json), start))])),
        },
    )]);
    let expected = tree(vec![
        ("id", PredicateEntry::Nested(account_id)),
        ("metadata", PredicateEntry::Nested(metadata)),
    ]);
    assert_eq!(actual, expected);
}

#[test]
fn nested_functions_yield_the_root_predicate() {
    let emits = sample();
    let start = emits.ident("DomainProjectionPredicate").unwrap();
    let actual = predicate_tree(&emits, &CodegenConfig::default(), start).unwrap();

    let Some(PredicateEntry::Nested(id)) = actual.get("id") else {
        panic!("`id` is not nested");
    };
    let Some(PredicateEntry::Fn { out, .. }) = id.get("equals") else {
        panic!("`id.equals` is not a function");
    };
    assert_eq!(out, &final_out(start));
}

fn variant(tag: &str, discriminant: u32, ty: TypeRef) -> EmitVariant {
    EmitVariant {
        tag: tag.into(),
        discriminant,
        ty,
    }
}

#[test]
fn first_variant_must_be_atom() {
    let mut map = EmitMap::new();
    let atom = map.insert_named("FooPredicateAtom", EmitCode::Enum { variants: vec![] });
    let foo = map.insert_named(
        "FooProjectionPredicate",
        EmitCode::Enum {
            variants: vec![variant("Field", 0, TypeRef::local(atom))],
        },
    );

    let err = predicate_tree(&map, &CodegenConfig::default(), foo).unwrap_err();
    assert_eq!(
        err,
        CodegenError::MalformedQuery {
            ident: "FooProjectionPredicate".into(),
            reason: "first variant is `Field`, not `Atom`".into(),
        }
    );
}

#[test]
fn self_projection_is_rejected() {
    let mut map = EmitMap::new();
    let atom = map.insert_named("LoopPredicateAtom", EmitCode::Enum { variants: vec![] });
    let looping = map.intern("LoopProjectionPredicate");
    map.insert(
        looping,
        EmitCode::Enum {
            variants: vec![
                variant("Atom", 0, TypeRef::local(atom)),
                variant("Again", 1, TypeRef::local(looping)),
            ],
        },
    );

    let err = predicate_tree(&map, &CodegenConfig::default(), looping).unwrap_err();
    assert!(matches!(err, CodegenError::MalformedQuery { reason, .. } if reason.contains("itself")));
}

#[test]
fn root_needs_predicate_suffix() {
    let mut map = EmitMap::new();
    let foo = map.insert_named("Foo", EmitCode::Enum { variants: vec![] });
    let err = predicate_tree(&map, &CodegenConfig::default(), foo).unwrap_err();
    assert!(matches!(err, CodegenError::MalformedQuery { ident, .. } if ident == "Foo"));
}
