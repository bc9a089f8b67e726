use super::*;
use pretty_assertions::assert_eq;

fn r(id: &str, args: Vec<TypeReference>) -> TypeReference {
    TypeReference::new(id, args)
}

fn p(id: &str) -> TypeReference {
    TypeReference::plain(id)
}

#[test]
fn parses_plain_identifier() {
    assert_eq!(TypeReference::parse("AccountId"), Some(p("AccountId")));
}

#[test]
fn parses_nested_generics() {
    assert_eq!(
        TypeReference::parse("Foo<Bar<Baz>, Qux>"),
        Some(r("Foo", vec![r("Bar", vec![p("Baz")]), p("Qux")]))
    );
}

#[test]
fn strips_namespace_paths() {
    assert_eq!(
        TypeReference::parse("iroha::data_model::Vec<iroha::Name>"),
        Some(r("Vec", vec![p("Name")]))
    );
}

#[test]
fn display_is_canonical() {
    let parsed = TypeReference::parse("SortedMap<  Name,Json >").unwrap();
    assert_eq!(parsed.to_string(), "SortedMap<Name, Json>");
    assert_eq!(p("u8").to_string(), "u8");
}

#[test]
fn unit_is_not_a_reference() {
    assert_eq!(TypeReference::parse("()"), None);
    assert_eq!(
        TypeReference::parse_detailed("()"),
        Err(ParseRefError::NotSingle { count: 0 })
    );
}

#[test]
fn array_literal_probe_fails_silently() {
    assert_eq!(TypeReference::parse("[u8; 32]"), None);
    assert_eq!(
        TypeReference::parse_detailed("[u8; 32]"),
        Err(ParseRefError::NotSingle { count: 2 })
    );
}

#[test]
fn numeric_generic_arguments() {
    assert_eq!(
        TypeReference::parse("Array<u8, 32>"),
        Some(r("Array", vec![p("u8"), p("32")]))
    );
}

#[test]
fn open_without_head_is_reported() {
    assert_eq!(
        TypeReference::parse_detailed("<Foo>"),
        Err(ParseRefError::OpenWithoutHead { offset: 0 })
    );
}

#[test]
fn unbalanced_close_is_reported() {
    assert_eq!(
        TypeReference::parse_detailed("Foo>"),
        Err(ParseRefError::UnbalancedClose { offset: 3 })
    );
}

#[test]
fn unclosed_is_reported() {
    assert_eq!(
        TypeReference::parse_detailed("Foo<Bar<Baz>"),
        Err(ParseRefError::Unclosed { depth: 1 })
    );
    assert_eq!(TypeReference::parse("Foo<Bar"), None);
}

#[test]
fn tokenizer_skips_non_ascii_separators() {
    assert_eq!(
        TypeReference::parse("Vec<Name>\u{2003}"),
        Some(r("Vec", vec![p("Name")]))
    );
}
