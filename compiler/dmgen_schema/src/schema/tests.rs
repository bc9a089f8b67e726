use super::*;
use pretty_assertions::assert_eq;
use std::io::Write;

const SAMPLE: &str = r#"{
    "u32": { "Int": "FixedWidth" },
    "Name": "String",
    "Domain": { "Struct": [{ "name": "id", "type": "DomainId" }] },
    "()": null
}"#;

#[test]
fn keys_keep_declaration_order() {
    let schema = Schema::from_json_str(SAMPLE).unwrap();
    let keys: Vec<_> = schema.keys().collect();
    assert_eq!(keys, ["u32", "Name", "Domain", "()"]);
    assert_eq!(schema.len(), 4);
    assert_eq!(schema.get("Name"), Some(&SchemaEntry::Alias("String".into())));
}

#[test]
fn extend_adds_new_entries() {
    let mut schema = Schema::from_json_str(SAMPLE).unwrap();
    let extension = Schema::from_json_str(r#"{ "Uptime": { "Tuple": ["Compact<u64>", "u32"] } }"#)
        .unwrap();
    schema.extend(extension).unwrap();
    assert!(schema.get("Uptime").is_some());
    assert_eq!(schema.len(), 5);
}

#[test]
fn extension_entries_follow_base_entries() {
    let mut schema = Schema::from_json_str(r#"{ "Zeta": null, "Alpha": null }"#).unwrap();
    let extension = Schema::from_json_str(r#"{ "Omega": null, "Beta": null }"#).unwrap();
    schema.extend(extension).unwrap();
    let keys: Vec<_> = schema.keys().collect();
    assert_eq!(keys, ["Zeta", "Alpha", "Omega", "Beta"]);
}

#[test]
fn extend_rejects_overlap() {
    let mut schema = Schema::from_json_str(SAMPLE).unwrap();
    let extension = Schema::from_json_str(r#"{ "Extra": null, "Name": "String" }"#).unwrap();
    let err = schema.extend(extension).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateEntry { ref key } if key == "Name"));
    assert!(schema.get("Extra").is_none());
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let schema = Schema::load(file.path()).unwrap();
    assert_eq!(schema.len(), 4);
}

#[test]
fn load_reports_missing_file() {
    let err = Schema::load(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn malformed_json_is_reported() {
    let err = Schema::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}
