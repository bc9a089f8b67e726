//! Selector trees.
//!
//! A selector projection enum starts with a unit `Atom` (select the current
//! value) followed by one variant per selectable field. Every node gets a
//! kebab-case id built from the root type name and the variant tags on the
//! way down, and the output type of selecting it.

use dmgen_ir::{ensure_sufficient_stack, CodegenConfig, CodegenError, EmitMap, Ident, LibType, TypeRef};
use heck::{ToKebabCase, ToLowerCamelCase};

use crate::lookup::{enum_variants, enum_variants_named, is_key_projection, key_projection, local_payload};
use crate::QueryArg;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorTree {
    /// Stable id, e.g. `account-id-domain-name`.
    pub id: String,
    /// Type of a selected value.
    pub output: TypeRef,
    pub children: Vec<SelectorChild>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorChild {
    Plain {
        field: String,
        tree: SelectorTree,
    },
    /// Map lookup taking the key.
    Keyed {
        field: String,
        args: Vec<QueryArg>,
        tree: SelectorTree,
    },
}

impl SelectorChild {
    pub fn field(&self) -> &str {
        match self {
            SelectorChild::Plain { field, .. } | SelectorChild::Keyed { field, .. } => field,
        }
    }

    pub fn tree(&self) -> &SelectorTree {
        match self {
            SelectorChild::Plain { tree, .. } | SelectorChild::Keyed { tree, .. } => tree,
        }
    }
}

impl SelectorTree {
    /// Node ids, root first, depth-first.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node| ids.push(node.id.as_str()));
        ids
    }

    /// `(id, output)` of every node, root first, depth-first.
    pub fn outputs(&self) -> Vec<(&str, &TypeRef)> {
        let mut outputs = Vec::new();
        self.walk(&mut |node| outputs.push((node.id.as_str(), &node.output)));
        outputs
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a SelectorTree)) {
        f(self);
        for child in &self.children {
            child.tree().walk(f);
        }
    }
}

/// Selector tree of the projection enum `ident`.
pub fn selector_tree(
    emits: &EmitMap,
    config: &CodegenConfig,
    ident: Ident,
) -> Result<SelectorTree, CodegenError> {
    let builder = Builder { emits, config };
    let root = builder.type_name(ident)?;
    let mut path = vec![root.to_owned()];
    let mut visiting = Vec::new();
    builder.build(ident, &mut path, &mut visiting)
}

struct Builder<'a> {
    emits: &'a EmitMap,
    config: &'a CodegenConfig,
}

impl Builder<'_> {
    /// `AccountProjectionSelector` -> `Account`.
    fn type_name(&self, ident: Ident) -> Result<&str, CodegenError> {
        let name = self.emits.name(ident);
        name.strip_suffix(self.config.selector_suffix.as_str()).ok_or_else(|| {
            CodegenError::malformed_query(
                name,
                format!("selector name does not end with `{}`", self.config.selector_suffix),
            )
        })
    }

    fn build(
        &self,
        ident: Ident,
        path: &mut Vec<String>,
        visiting: &mut Vec<Ident>,
    ) -> Result<SelectorTree, CodegenError> {
        if visiting.contains(&ident) {
            return Err(CodegenError::malformed_query(
                self.emits.name(ident),
                "projection refers to itself",
            ));
        }
        visiting.push(ident);
        let tree = ensure_sufficient_stack(|| self.build_node(ident, path, visiting));
        visiting.pop();
        tree
    }

    fn build_node(
        &self,
        ident: Ident,
        path: &mut Vec<String>,
        visiting: &mut Vec<Ident>,
    ) -> Result<SelectorTree, CodegenError> {
        let emits = self.emits;
        let variants = enum_variants(emits, ident)?;
        let Some((atom, fields)) = variants.split_first() else {
            return Err(CodegenError::malformed_query(emits.name(ident), "selector has no variants"));
        };
        if atom.tag != "Atom" || atom.ty != TypeRef::Null {
            return Err(CodegenError::malformed_query(
                emits.name(ident),
                "first variant must be a unit `Atom`",
            ));
        }

        let mut children = Vec::with_capacity(fields.len());
        for variant in fields {
            let target = local_payload(emits, ident, variant)?;
            let field = variant.tag.to_lower_camel_case();
            let child = if is_key_projection(emits, self.config, target) {
                let (key, projection) = key_projection(emits, target)?;
                path.push("key".into());
                let tree = self.build(projection, path, visiting);
                path.pop();
                SelectorChild::Keyed {
                    field,
                    args: vec![key],
                    tree: tree?,
                }
            } else {
                path.push(variant.tag.clone());
                let tree = self.build(target, path, visiting);
                path.pop();
                SelectorChild::Plain { field, tree: tree? }
            };
            children.push(child);
        }

        let id = path
            .iter()
            .map(|segment| segment.to_kebab_case())
            .collect::<Vec<_>>()
            .join("-");
        Ok(SelectorTree {
            id,
            output: self.output(ident)?,
            children,
        })
    }

    /// Element type of the output batch variant matching the selector type.
    fn output(&self, ident: Ident) -> Result<TypeRef, CodegenError> {
        let tag = self.config.selector_output_name(self.type_name(ident)?);
        let malformed =
            |reason: String| CodegenError::malformed_query(self.config.output_box.as_str(), reason);
        let batch = enum_variants_named(self.emits, &self.config.output_box)?
            .iter()
            .find(|variant| variant.tag == tag)
            .ok_or_else(|| malformed(format!("no output variant `{tag}`")))?;
        match &batch.ty {
            TypeRef::Lib {
                id: LibType::Vec,
                params,
            } if params.len() == 1 => Ok(params[0].clone().into_foreign()),
            _ => Err(malformed(format!("output variant `{tag}` is not a batch"))),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
