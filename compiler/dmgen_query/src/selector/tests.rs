use dmgen_ir::{EmitCode, EmitVariant};
use dmgen_resolve::Resolver;
use dmgen_schema::Schema;
use pretty_assertions::assert_eq;

use super::*;

const SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/schema.json"));

fn sample() -> EmitMap {
    let schema = Schema::from_json_str(SCHEMA).unwrap();
    Resolver::run(&schema, &CodegenConfig::default()).unwrap()
}

fn account_tree(emits: &EmitMap) -> SelectorTree {
    let root = emits.ident("AccountProjectionSelector").unwrap();
    selector_tree(emits, &CodegenConfig::default(), root).unwrap()
}

#[test]
fn ids_chain_variant_tags() {
    let emits = sample();
    let tree = account_tree(&emits);
    assert_eq!(
        tree.ids(),
        [
            "account",
            "account-id",
            "account-id-domain",
            "account-id-domain-name",
            "account-metadata",
            "account-metadata-key",
        ]
    );
}

#[test]
fn outputs_come_from_the_batch_box() {
    let emits = sample();
    let tree = account_tree(&emits);
    let foreign = |name: &str| TypeRef::Foreign {
        id: emits.ident(name).unwrap(),
        params: vec![],
    };

    let outputs: Vec<_> = tree
        .outputs()
        .into_iter()
        .map(|(id, output)| (id.to_owned(), output.clone()))
        .collect();
    assert_eq!(
        outputs,
        [
            ("account".to_owned(), foreign("Account")),
            ("account-id".to_owned(), TypeRef::lib(LibType::AccountId)),
            ("account-id-domain".to_owned(), TypeRef::lib(LibType::DomainId)),
            ("account-id-domain-name".to_owned(), TypeRef::lib(LibType::Name)),
            ("account-metadata".to_owned(), foreign("Metadata")),
            ("account-metadata-key".to_owned(), TypeRef::lib(LibType::Json)),
        ]
    );
}

#[test]
fn map_lookups_take_the_key() {
    let emits = sample();
    let tree = account_tree(&emits);
    let metadata = tree.children[1].tree();
    let [SelectorChild::Keyed { field, args, tree }] = metadata.children.as_slice() else {
        panic!("metadata has no keyed child");
    };
    assert_eq!(field, "key");
    assert_eq!(
        args,
        &[QueryArg {
            name: "key".into(),
            ty: TypeRef::lib(LibType::Name),
        }]
    );
    assert!(tree.children.is_empty());
}

fn atom(ty: TypeRef) -> EmitVariant {
    EmitVariant {
        tag: "Atom".into(),
        discriminant: 0,
        ty,
    }
}

fn batch_box(map: &mut EmitMap, tags: &[&str]) {
    let variants = (0..)
        .zip(tags)
        .map(|(i, tag)| EmitVariant {
            tag: (*tag).into(),
            discriminant: i,
            ty: TypeRef::lib_with(LibType::Vec, vec![TypeRef::lib(LibType::U32)]),
        })
        .collect();
    map.insert_named("QueryOutputBatchBox", EmitCode::Enum { variants });
}

#[test]
fn exceptions_rename_the_output_variant() {
    let mut map = EmitMap::new();
    batch_box(&mut map, &["Peer"]);
    let peer = map.insert_named(
        "PeerIdProjectionSelector",
        EmitCode::Enum {
            variants: vec![atom(TypeRef::Null)],
        },
    );

    let tree = selector_tree(&map, &CodegenConfig::default(), peer).unwrap();
    assert_eq!(tree.id, "peer-id");
    assert_eq!(tree.output, TypeRef::lib(LibType::U32));
}

#[test]
fn atom_must_be_unit() {
    let mut map = EmitMap::new();
    batch_box(&mut map, &["Foo"]);
    let foo = map.insert_named(
        "FooProjectionSelector",
        EmitCode::Enum {
            variants: vec![atom(TypeRef::lib(LibType::U8))],
        },
    );

    let err = selector_tree(&map, &CodegenConfig::default(), foo).unwrap_err();
    assert_eq!(
        err,
        CodegenError::MalformedQuery {
            ident: "FooProjectionSelector".into(),
            reason: "first variant must be a unit `Atom`".into(),
        }
    );
}

#[test]
fn missing_output_variant_is_fatal() {
    let mut map = EmitMap::new();
    batch_box(&mut map, &["Bar"]);
    let foo = map.insert_named(
        "FooProjectionSelector",
        EmitCode::Enum {
            variants: vec![atom(TypeRef::Null)],
        },
    );

    let err = selector_tree(&map, &CodegenConfig::default(), foo).unwrap_err();
    assert_eq!(
        err,
        CodegenError::MalformedQuery {
            ident: "QueryOutputBatchBox".into(),
            reason: "no output variant `Foo`".into(),
        }
    );
}
