//! Shortcut constructors of enums.
//!
//! A tree renders to an object literal; nested enums become nested objects.
//! For `A { Nested(B) }`, `B { Bunit }` the value side is
//!
//! ```text
//! { Nested: { Bunit: Object.freeze<lib.Variant<'Nested', lib.VariantUnit<'Bunit'>>>(
//!     { kind: 'Nested', value: B.Bunit }) } }
//! ```
//!
//! reusing `B`'s own shortcut for the inner value.

use dmgen_ir::{CodegenError, IdentTable};
use dmgen_resolve::{ShortcutKind, ShortcutTree, ShortcutVariant};

use crate::render_ref;

/// Which side of the shortcuts object to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShortcutsSide {
    /// The object's type.
    Type,
    /// The object itself.
    Value,
}

/// Position of a variant below the root.
#[derive(Clone)]
struct Path {
    /// Root variant: the `kind` of every value built below it.
    root_variant: String,
    /// `[nested enum, variant, variant, ...]` below the root variant; empty
    /// at the top level.
    chain: Vec<String>,
}

impl Path {
    fn enter(current: Option<&Path>, tree_id: &str, variant: &str) -> Path {
        match current {
            None => Path {
                root_variant: variant.to_owned(),
                chain: Vec::new(),
            },
            Some(path) if path.chain.is_empty() => Path {
                root_variant: path.root_variant.clone(),
                chain: vec![tree_id.to_owned(), variant.to_owned()],
            },
            Some(path) => {
                let mut chain = path.chain.clone();
                chain.push(variant.to_owned());
                Path {
                    root_variant: path.root_variant.clone(),
                    chain,
                }
            }
        }
    }

    /// Property path of the nested enum's own shortcut, e.g. `B.Bnested.C1`.
    fn access(&self) -> String {
        self.chain.join(".")
    }

    /// Full variant type from the root down to `last`.
    fn concrete_type(&self, last: String) -> String {
        let Some((_, below_root)) = self.chain.split_first() else {
            return last;
        };
        // The last chain element is the variant `last` describes.
        let outer = below_root.split_last().map_or(&[][..], |(_, rest)| rest);
        std::iter::once(&self.root_variant)
            .chain(outer)
            .rev()
            .fold(last, |acc, tag| format!("lib.Variant<'{tag}', {acc}>"))
    }
}

/// Render the shortcuts object of `tree`.
pub fn render_shortcuts(
    tree: &ShortcutTree,
    side: ShortcutsSide,
    idents: &IdentTable,
) -> Result<String, CodegenError> {
    render_tree(tree, None, side, idents)
}

fn render_tree(
    tree: &ShortcutTree,
    path: Option<&Path>,
    side: ShortcutsSide,
    idents: &IdentTable,
) -> Result<String, CodegenError> {
    let tree_id = idents.name(tree.id);
    let items = tree
        .variants
        .iter()
        .map(|variant| {
            let path = Path::enter(path, tree_id, &variant.name);
            render_variant(variant, &path, side, idents)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{{ {} }}", items.join(", ")))
}

fn render_variant(
    variant: &ShortcutVariant,
    path: &Path,
    side: ShortcutsSide,
    idents: &IdentTable,
) -> Result<String, CodegenError> {
    let name = &variant.name;
    let kind = &path.root_variant;
    let rendered = match (&variant.kind, side) {
        (ShortcutKind::Unit, ShortcutsSide::Type) => {
            format!("{name}: {}", path.concrete_type(format!("lib.VariantUnit<'{name}'>")))
        }
        (ShortcutKind::Unit, ShortcutsSide::Value) if path.chain.is_empty() => {
            format!("{name}: Object.freeze({{ kind: '{kind}' }})")
        }
        (ShortcutKind::Unit, ShortcutsSide::Value) => format!(
            "{name}: Object.freeze<{}>({{ kind: '{kind}', value: {} }})",
            path.concrete_type(format!("lib.VariantUnit<'{name}'>")),
            path.access(),
        ),
        (ShortcutKind::Value(ty), side) => {
            let value_ty = render_ref(ty, idents)?.ty;
            let ret = path.concrete_type(format!("lib.Variant<'{name}', T>"));
            match side {
                ShortcutsSide::Type => format!("{name}: <const T extends {value_ty}>(value: T) => {ret}"),
                ShortcutsSide::Value => {
                    let body = if path.chain.is_empty() {
                        format!("({{ kind: '{kind}', value }})")
                    } else {
                        format!("({{ kind: '{kind}', value: {}(value) }})", path.access())
                    };
                    format!("{name}: <const T extends {value_ty}>(value: T): {ret} => {body}")
                }
            }
        }
        (ShortcutKind::Enum(nested), side) => {
            format!("{name}: {}", render_tree(nested, Some(path), side, idents)?)
        }
    };
    Ok(rendered)
}
