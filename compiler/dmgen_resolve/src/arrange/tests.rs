use dmgen_ir::{EmitCode, EmitField, EmitVariant, LibType};
use pretty_assertions::assert_eq;

use super::*;

fn struct_of(fields: &[(&str, TypeRef)]) -> EmitCode {
    EmitCode::Struct {
        fields: fields
            .iter()
            .map(|(name, ty)| EmitField {
                name: (*name).into(),
                ty: ty.clone(),
            })
            .collect(),
    }
}

fn lazy(id: Ident) -> TypeRef {
    TypeRef::Local {
        id,
        params: vec![],
        lazy: true,
    }
}

fn names(map: &EmitMap, order: &[Ident]) -> Vec<String> {
    order.iter().map(|&ident| map.name(ident).to_owned()).collect()
}

fn config_with_breakpoint(name: &str) -> CodegenConfig {
    CodegenConfig {
        breakpoints: vec![name.into()],
        ..CodegenConfig::default()
    }
}

#[test]
fn dependencies_come_first() {
    let mut map = EmitMap::new();
    let owner = map.local_ref("Owner");
    let metadata = map.local_ref("Metadata");
    map.insert_named(
        "Account",
        struct_of(&[
            ("owner", owner),
            ("metadata", TypeRef::lib_with(LibType::Option, vec![metadata])),
        ]),
    );
    map.insert_named("Owner", struct_of(&[("name", TypeRef::lib(LibType::Name))]));
    map.insert_named(
        "Metadata",
        EmitCode::Alias {
            to: TypeRef::lib(LibType::Json),
        },
    );

    let order = arrange(&map, &CodegenConfig::default()).unwrap();
    assert_eq!(names(&map, &order), ["Owner", "Metadata", "Account"]);
}

#[test]
fn cycle_through_breakpoint_sorts() {
    let mut map = EmitMap::new();
    let instruction = map.intern("Instruction");
    let batch = map.local_ref("Batch");
    map.insert(
        instruction,
        EmitCode::Enum {
            variants: vec![EmitVariant {
                tag: "Batch".into(),
                discriminant: 0,
                ty: batch,
            }],
        },
    );
    map.insert_named(
        "Batch",
        struct_of(&[(
            "items",
            TypeRef::lib_with(LibType::Vec, vec![lazy(instruction)]),
        )]),
    );

    let order = arrange(&map, &config_with_breakpoint("Instruction")).unwrap();
    assert_eq!(names(&map, &order), ["Batch", "Instruction"]);
}

#[test]
fn undeclared_cycle_is_fatal() {
    let mut map = EmitMap::new();
    let a = map.local_ref("A");
    let b = map.local_ref("B");
    map.insert_named("A", struct_of(&[("b", b)]));
    map.insert_named("B", struct_of(&[("a", a)]));

    let err = arrange(&map, &CodegenConfig::default()).unwrap_err();
    assert_eq!(err, CodegenError::UnexpectedCycle { ident: "A".into() });
}

#[test]
fn eager_reference_to_breakpoint_is_fatal() {
    let mut map = EmitMap::new();
    let instruction = map.local_ref("Instruction");
    map.insert_named("Instruction", EmitCode::Enum { variants: vec![] });
    map.insert_named("Holder", struct_of(&[("inner", instruction)]));

    let err = arrange(&map, &config_with_breakpoint("Instruction")).unwrap_err();
    assert_eq!(
        err,
        CodegenError::EagerBreakpointReference {
            from: "Holder".into(),
            to: "Instruction".into(),
        }
    );
}

#[test]
fn reference_without_emission_is_fatal() {
    let mut map = EmitMap::new();
    let ghost = map.local_ref("Ghost");
    map.insert_named("Holder", struct_of(&[("ghost", ghost)]));

    let err = arrange(&map, &CodegenConfig::default()).unwrap_err();
    assert_eq!(
        err,
        CodegenError::MissingEmission {
            ident: "Ghost".into()
        }
    );
}

#[test]
fn generic_arguments_are_dependencies() {
    let mut map = EmitMap::new();
    let domain = map.local_ref("Domain");
    let set = map.intern("SetKeyValue");
    let instantiated = TypeRef::Local {
        id: set,
        params: vec![domain],
        lazy: false,
    };
    map.insert_named("Box", struct_of(&[("set", instantiated)]));
    map.insert(set, struct_of(&[("object", TypeRef::Param(0))]));
    map.insert_named("Domain", struct_of(&[]));

    let order = arrange(&map, &CodegenConfig::default()).unwrap();
    assert_eq!(names(&map, &order), ["SetKeyValue", "Domain", "Box"]);
}
