#![allow(clippy::unwrap_used, clippy::expect_used)]

use dmgen_ir::{CodegenConfig, EmitMap};
use dmgen_query::{FindQueries, IterableQuery, QueryProjections, SingularQuery};
use dmgen_resolve::Resolver;
use dmgen_schema::Schema;
use pretty_assertions::assert_eq;

const SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/schema.json"));

fn sample() -> EmitMap {
    let schema = Schema::from_json_str(SCHEMA).unwrap();
    Resolver::run(&schema, &CodegenConfig::default()).unwrap()
}

#[test]
fn one_projection_per_query() {
    let emits = sample();
    let projections = QueryProjections::build(&emits, &CodegenConfig::default()).unwrap();
    let queries: Vec<_> = projections.queries.iter().map(|q| q.query.as_str()).collect();
    assert_eq!(queries, ["FindDomains", "FindAccounts", "FindAccountsWithAsset"]);

    let domains = &projections.queries[0];
    assert_eq!(
        domains.selector_ids,
        [
            "domain",
            "domain-id",
            "domain-id-name",
            "domain-metadata",
            "domain-metadata-key",
        ]
    );
    assert_eq!(domains.predicate.len(), 2);
}

#[test]
fn shared_selectors_merge() {
    let emits = sample();
    let projections = QueryProjections::build(&emits, &CodegenConfig::default()).unwrap();
    let ids: Vec<_> = projections.outputs.iter().map(|(id, _)| id.as_str()).collect();
    // The two account queries share every selector.
    assert_eq!(
        ids,
        [
            "domain",
            "domain-id",
            "domain-id-name",
            "domain-metadata",
            "domain-metadata-key",
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
fn find_api_queries() {
    let emits = sample();
    let queries = FindQueries::collect(&emits, &CodegenConfig::default()).unwrap();
    assert_eq!(
        queries.iterable,
        [
            IterableQuery {
                tag: "FindDomains".into(),
                method: "domains".into(),
                payload: None,
            },
            IterableQuery {
                tag: "FindAccounts".into(),
                method: "accounts".into(),
                payload: None,
            },
            IterableQuery {
                tag: "FindAccountsWithAsset".into(),
                method: "accountsWithAsset".into(),
                payload: Some("FindAccountsWithAsset".into()),
            },
        ]
    );
    assert_eq!(
        queries.singular,
        [
            SingularQuery {
                tag: "FindExecutorDataModel".into(),
                method: "executorDataModel".into(),
            },
            SingularQuery {
                tag: "FindParameters".into(),
                method: "parameters".into(),
            },
        ]
    );
}

#[test]
fn projections_are_deterministic() {
    let first = QueryProjections::build(&sample(), &CodegenConfig::default()).unwrap();
    let second = QueryProjections::build(&sample(), &CodegenConfig::default()).unwrap();
    assert_eq!(first, second);
}
