//! Query prototypes: the type-level description of every query's predicates
//! and selectors.

use dmgen_ir::{CodegenError, IdentTable};
use dmgen_query::{PredicateEntry, PredicateOutput, PredicateTree, QueryArg, QueryProjections, SelectorChild, SelectorTree};

use crate::render_ref;

/// Render the prototypes module. `lib` is the data model module.
#[tracing::instrument(level = "debug", skip_all)]
pub fn generate_prototypes(
    projections: &QueryProjections,
    idents: &IdentTable,
    lib: &str,
) -> Result<String, CodegenError> {
    let queries = &projections.queries;

    let compat = queries
        .iter()
        .map(|q| {
            let ids = q.selector_ids.iter().map(|id| format!("'{id}'")).collect::<Vec<_>>();
            format!("  {}: {}", q.query, ids.join(" | "))
        })
        .collect::<Vec<_>>();

    let outputs = projections
        .outputs
        .iter()
        .map(|(id, output)| Ok(format!("  '{id}': {}", render_ref(output, idents)?.ty)))
        .collect::<Result<Vec<_>, CodegenError>>()?;

    let selectors = queries
        .iter()
        .map(|q| Ok(format!("  {}: {}", q.query, render_selector(&q.selector, "  ", idents)?)))
        .collect::<Result<Vec<_>, CodegenError>>()?;

    let predicates = queries
        .iter()
        .map(|q| Ok(format!("  {}: {}", q.query, render_predicate(&q.predicate, "  ", idents)?)))
        .collect::<Result<Vec<_>, CodegenError>>()?;

    let mut out = [
        format!("import type * as lib from '{lib}'"),
        type_block("QueryCompatibleSelectors", &compat),
        type_block("SelectorIdToOutput", &outputs),
        type_block("QuerySelectors", &selectors),
        type_block("QueryPredicates", &predicates),
    ]
    .join("\n\n");
    out.push('\n');
    Ok(out)
}

fn type_block(name: &str, entries: &[String]) -> String {
    format!("export type {name} = {{\n{}\n}}", entries.join("\n"))
}

fn render_args(args: &[QueryArg], idents: &IdentTable) -> Result<String, CodegenError> {
    let args = args
        .iter()
        .map(|arg| Ok(format!("{}: {}", arg.name, render_ref(&arg.ty, idents)?.ty)))
        .collect::<Result<Vec<_>, CodegenError>>()?;
    Ok(args.join(", "))
}

fn render_selector(tree: &SelectorTree, indent: &str, idents: &IdentTable) -> Result<String, CodegenError> {
    let inner = format!("{indent}  ");
    let mut out = format!("{{\n{inner}__selector: '{}',\n", tree.id);
    for child in &tree.children {
        let nested = render_selector(child.tree(), &inner, idents)?;
        match child {
            SelectorChild::Plain { field, .. } => out.push_str(&format!("{inner}{field}: {nested}\n")),
            SelectorChild::Keyed { field, args, .. } => {
                let args = render_args(args, idents)?;
                out.push_str(&format!("{inner}{field}({args}): {nested}\n"));
            }
        }
    }
    out.push_str(indent);
    out.push('}');
    Ok(out)
}

fn render_predicate(tree: &PredicateTree, indent: &str, idents: &IdentTable) -> Result<String, CodegenError> {
    if tree.is_empty() {
        return Ok("never".into());
    }
    let inner = format!("{indent}  ");
    let mut items = Vec::with_capacity(tree.len());
    for (name, entry) in tree.entries() {
        let item = match entry {
            PredicateEntry::Nested(nested) => format!("{name}: {}", render_predicate(nested, &inner, idents)?),
            PredicateEntry::Fn { args, out } => {
                let output = match out {
                    PredicateOutput::Nested(nested) => render_predicate(nested, &inner, idents)?,
                    PredicateOutput::Final(ty) => render_ref(ty, idents)?.ty,
                };
                format!("{name}: ({}) => {output}", render_args(args, idents)?)
            }
        };
        items.push(format!("{inner}{item}"));
    }
    Ok(format!("{{\n{}\n{indent}}}", items.join("\n")))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use dmgen_ir::{CodegenConfig, EmitMap};
    use dmgen_resolve::Resolver;
    use dmgen_schema::Schema;
    use pretty_assertions::assert_eq;

    use super::*;

    const SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/schema.json"));

    fn sample() -> (EmitMap, QueryProjections) {
        let config = CodegenConfig::default();
        let schema = Schema::from_json_str(SCHEMA).unwrap();
        let emits = Resolver::run(&schema, &config).unwrap();
        let projections = QueryProjections::build(&emits, &config).unwrap();
        (emits, projections)
    }

    #[test]
    fn domain_selectors() {
        let (emits, projections) = sample();
        let domains = &projections.queries[0];
        assert_eq!(
            render_selector(&domains.selector, "  ", emits.idents()).unwrap(),
            "{\n\
             \x20   __selector: 'domain',\n\
             \x20   id: {\n\
             \x20     __selector: 'domain-id',\n\
             \x20     name: {\n\
             \x20       __selector: 'domain-id-name',\n\
             \x20     }\n\
             \x20   }\n\
             \x20   metadata: {\n\
             \x20     __selector: 'domain-metadata',\n\
             \x20     key(key: lib.Name): {\n\
             \x20       __selector: 'domain-metadata-key',\n\
             \x20     }\n\
             \x20   }\n\
             \x20 }"
        );
    }

    #[test]
    fn domain_predicates() {
        let (emits, projections) = sample();
        let domains = &projections.queries[0];
        assert_eq!(
            render_predicate(&domains.predicate, "  ", emits.idents()).unwrap(),
            "{\n\
             \x20   id: {\n\
             \x20     equals: (value: lib.DomainId) => lib.DomainProjectionPredicate\n\
             \x20     name: {\n\
             \x20       equals: (value: lib.String) => lib.DomainProjectionPredicate\n\
             \x20       contains: (value: lib.String) => lib.DomainProjectionPredicate\n\
             \x20       isEmpty: () => lib.DomainProjectionPredicate\n\
             \x20     }\n\
             \x20   }\n\
             \x20   metadata: {\n\
             \x20     key: (key: lib.Name) => {\n\
             \x20       equals: (value: lib.Json) => lib.DomainProjectionPredicate\n\
             \x20     }\n\
             \x20   }\n\
             \x20 }"
        );
    }

    #[test]
    fn empty_predicate_is_never() {
        let idents = IdentTable::new();
        assert_eq!(render_predicate(&PredicateTree::default(), "", &idents).unwrap(), "never");
    }

    #[test]
    fn module_sections() {
        let (emits, projections) = sample();
        let module = generate_prototypes(&projections, emits.idents(), "./types").unwrap();
        assert!(module.starts_with("import type * as lib from './types'\n\nexport type QueryCompatibleSelectors = {\n"));
        assert!(module.contains(
            "  FindDomains: 'domain' | 'domain-id' | 'domain-id-name' | 'domain-metadata' | 'domain-metadata-key'\n"
        ));
        assert!(module.contains("export type SelectorIdToOutput = {\n  'domain': lib.Domain\n"));
        assert!(module.contains("  'account-metadata-key': lib.Json\n}"));
        assert!(module.contains("\n\nexport type QuerySelectors = {\n  FindDomains: {\n"));
        assert!(module.contains("\n\nexport type QueryPredicates = {\n  FindDomains: {\n"));
    }
}
