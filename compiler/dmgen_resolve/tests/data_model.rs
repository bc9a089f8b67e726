//! Whole-pipeline properties over the sample data model.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dmgen_ir::visit::walk_code;
use dmgen_ir::{CodegenConfig, EmitCode, EmitMap, Ident, LibType, TypeRef};
use dmgen_resolve::{arrange, enum_shortcuts, Resolver, ShortcutKind, ShortcutVariant};
use dmgen_schema::Schema;
use pretty_assertions::assert_eq;

const SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/schema.json"));

fn compile() -> (EmitMap, Vec<Ident>) {
    let schema = Schema::from_json_str(SCHEMA).unwrap();
    let config = CodegenConfig::default();
    let emits = Resolver::run(&schema, &config).unwrap();
    let order = arrange(&emits, &config).unwrap();
    (emits, order)
}

fn emitted<'a>(emits: &'a EmitMap, name: &str) -> Option<&'a EmitCode> {
    emits.ident(name).and_then(|ident| emits.get(ident))
}

fn shortcuts(emits: &EmitMap, name: &str) -> Vec<ShortcutVariant> {
    let Some(EmitCode::Enum { variants }) = emitted(emits, name) else {
        panic!("{name} is not an enum");
    };
    enum_shortcuts(variants, emits).unwrap()
}

fn position(order: &[Ident], ident: Ident) -> usize {
    order.iter().position(|&i| i == ident).unwrap()
}

#[test]
fn every_emission_is_ordered_once() {
    let (emits, order) = compile();
    assert_eq!(order.len(), emits.len());
    let mut sorted = order.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), order.len());
}

#[test]
fn eager_dependencies_precede_dependents() {
    let (emits, order) = compile();
    for (ident, code) in emits.iter() {
        walk_code(code, &mut |ty| {
            if let TypeRef::Local { id, lazy: false, .. } = ty {
                assert!(
                    position(&order, *id) < position(&order, ident),
                    "{} must precede {}",
                    emits.name(*id),
                    emits.name(ident),
                );
            }
        });
    }
}

#[test]
fn breakpoint_references_are_all_lazy() {
    let (emits, _) = compile();
    let instruction = emits.ident("InstructionBox").unwrap();
    let mut seen = 0;
    for (_, code) in emits.iter() {
        walk_code(code, &mut |ty| {
            if let TypeRef::Local { id, lazy, .. } = ty {
                if *id == instruction {
                    assert!(lazy);
                    seen += 1;
                }
            }
        });
    }
    // InstructionBatch and Executable.
    assert_eq!(seen, 2);
}

#[test]
fn query_instantiations_share_one_shape() {
    let (emits, _) = compile();
    let Some(EmitCode::Struct { fields }) = emitted(&emits, "QueryWithFilter") else {
        panic!("QueryWithFilter is not a struct");
    };
    let params: Vec<_> = fields.iter().map(|f| f.ty.clone()).collect();
    assert_eq!(params, [TypeRef::Param(0), TypeRef::Param(1), TypeRef::Param(2)]);
}

#[test]
fn never_constructible_enums_are_pruned() {
    let (emits, _) = compile();
    assert_eq!(
        emitted(&emits, "VoidEvent"),
        Some(&EmitCode::Enum { variants: vec![] })
    );

    let event = shortcuts(&emits, "Event");
    let names: Vec<_> = event.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Time"]);
}

#[test]
fn instruction_shortcuts_reach_generic_boxes() {
    let (emits, _) = compile();
    let variants = shortcuts(&emits, "InstructionBox");

    let ShortcutKind::Enum(set_key_value) = &variants[1].kind else {
        panic!("SetKeyValue is not a nested enum");
    };
    let ShortcutKind::Value(TypeRef::Local { params, .. }) = &set_key_value.variants[0].kind else {
        panic!("SetKeyValue::Domain is not a value");
    };
    assert_eq!(params, &[TypeRef::lib(LibType::DomainId)]);
}

#[test]
fn arrangement_is_deterministic() {
    let (first_emits, first) = compile();
    let (second_emits, second) = compile();
    let names = |emits: &EmitMap, order: &[Ident]| -> Vec<String> {
        order.iter().map(|&i| emits.name(i).to_owned()).collect()
    };
    assert_eq!(names(&first_emits, &first), names(&second_emits, &second));
}
