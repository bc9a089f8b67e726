//! The data model module: one declaration and codec per emitted type.

use dmgen_ir::visit::max_param_index;
use dmgen_ir::{CodegenError, EmitCode, EmitField, EmitMap, EmitVariant, Ident, LibType, TypeRef};
use dmgen_resolve::{enum_shortcuts, ShortcutTree};
use heck::ToLowerCamelCase;
use tracing::debug;

use crate::{render_ref, render_shortcuts, ShortcutsSide};

/// Render every identifier of `order` (a dependency order of `emits`).
#[tracing::instrument(level = "debug", skip_all, fields(lib = lib_module))]
pub fn generate_data_model(
    emits: &EmitMap,
    order: &[Ident],
    lib_module: &str,
) -> Result<String, CodegenError> {
    let mut items = Vec::with_capacity(order.len() + 1);
    items.push(format!("import * as lib from '{lib_module}'"));
    for &ident in order {
        items.push(render_emit(emits, ident)?);
    }
    debug!(items = order.len(), "rendered data model");
    let mut out = items.join("\n\n");
    out.push('\n');
    Ok(out)
}

/// Declaration and codec of one identifier.
pub fn render_emit(emits: &EmitMap, ident: Ident) -> Result<String, CodegenError> {
    let id = emits.name(ident);
    let code = emits.get(ident).ok_or_else(|| CodegenError::MissingEmission { ident: id.to_owned() })?;
    let lines = match code {
        EmitCode::Enum { variants } if variants.is_empty() => render_never(id),
        EmitCode::Enum { variants } => render_enum(emits, ident, variants)?,
        EmitCode::Struct { fields } => render_struct(emits, id, code, fields)?,
        EmitCode::Tuple { elements } => {
            let rendered = elements
                .iter()
                .map(|element| render_ref(element, emits.idents()))
                .collect::<Result<Vec<_>, _>>()?;
            let types = join(rendered.iter().map(|r| r.ty.as_str()));
            let codecs = join(rendered.iter().map(|r| r.codec.as_str()));
            vec![
                format!("export type {id} = [{types}]"),
                format!("export const {id}: lib.CodecContainer<{id}> = lib.defineCodec(lib.tupleCodec([{codecs}]))"),
            ]
        }
        EmitCode::Bitmap { repr, masks } => {
            if *repr != LibType::U32 {
                return Err(CodegenError::unexpected_shape(id, "bitmap is not backed by u32"));
            }
            let literals = masks.iter().map(|m| format!("'{}'", m.name)).collect::<Vec<_>>();
            let codec_masks = masks.iter().map(|m| format!("{}: {}", m.name, m.mask)).collect::<Vec<_>>();
            vec![
                format!("export type {id} = Set<{}>", literals.join(" | ")),
                format!(
                    "export const {id}: lib.CodecContainer<{id}> = lib.defineCodec(lib.bitmapCodec<{id} extends Set<infer T> ? T : never>({{ {} }}))",
                    codec_masks.join(", ")
                ),
            ]
        }
        EmitCode::Alias { to } => {
            let rendered = render_ref(to, emits.idents())?;
            let value = match rendered.value_id {
                Some(value_id) => format!("export const {id} = {value_id}"),
                None => format!(
                    "export const {id}: lib.CodecContainer<{id}> = lib.defineCodec({})",
                    rendered.codec
                ),
            };
            vec![format!("export type {id} = {}", rendered.ty), value]
        }
    };
    Ok(lines.join("\n"))
}

fn render_never(id: &str) -> Vec<String> {
    vec![
        jsdoc(&[
            "This type could not be constructed.",
            "",
            "It is an enumeration without any variants that could be created _at this time_. However,",
            "future versions of the data model may extend it with constructible variants.",
        ]),
        format!("export type {id} = never"),
        jsdoc(&[
            format!("Codec for {{@link {id}}}.").as_str(),
            "",
            "Since the type is `never`, this codec does nothing and throws an error if actually called.",
        ]),
        format!("export const {id}: lib.CodecContainer<never> = lib.defineCodec(lib.neverCodec)"),
    ]
}

fn render_enum(emits: &EmitMap, ident: Ident, variants: &[EmitVariant]) -> Result<Vec<String>, CodegenError> {
    let id = emits.name(ident);
    let idents = emits.idents();

    let mut sum = Vec::with_capacity(variants.len());
    let mut types = Vec::with_capacity(variants.len());
    let mut options = Vec::with_capacity(variants.len());
    for EmitVariant { tag, discriminant, ty } in variants {
        if *ty == TypeRef::Null {
            sum.push(format!("lib.VariantUnit<'{tag}'>"));
            types.push(format!("{tag}: []"));
            options.push(format!("{tag}: [{discriminant}]"));
        } else {
            let rendered = render_ref(ty, idents)?;
            sum.push(format!("lib.Variant<'{tag}', {}>", rendered.ty));
            types.push(format!("{tag}: [{}]", rendered.ty));
            options.push(format!("{tag}: [{discriminant}, {}]", rendered.codec));
        }
    }
    let codec = format!(
        "lib.enumCodec<{{ {} }}>({{ {} }}).discriminated()",
        types.join(", "),
        options.join(", ")
    );

    let tree = ShortcutTree {
        id: ident,
        variants: enum_shortcuts(variants, emits)?,
    };
    let shortcuts_value = render_shortcuts(&tree, ShortcutsSide::Value, idents)?;
    let shortcuts_type = render_shortcuts(&tree, ShortcutsSide::Type, idents)?;

    let mut doc = vec![
        "Enumeration (discriminated union). Represented as one of the following variants:".to_owned(),
        String::new(),
    ];
    doc.extend(variants.iter().map(|v| format!("- `{}`", v.tag)));
    let doc: Vec<&str> = doc.iter().map(String::as_str).collect();

    Ok(vec![
        jsdoc(&doc),
        format!("export type {id} = {}", sum.join(" | ")),
        jsdoc(&[format!("Codec and constructors for enumeration {{@link {id}}}.").as_str()]),
        format!(
            "export const {id}: lib.CodecContainer<{id}> & {shortcuts_type} = {{ ...{shortcuts_value}, ...lib.defineCodec({codec}) }}"
        ),
    ])
}

fn render_struct(
    emits: &EmitMap,
    id: &str,
    code: &EmitCode,
    fields: &[EmitField],
) -> Result<Vec<String>, CodegenError> {
    let idents = emits.idents();
    let mut type_fields = Vec::with_capacity(fields.len());
    let mut order = Vec::with_capacity(fields.len());
    let mut codecs = Vec::with_capacity(fields.len());
    for field in fields {
        let name = field.name.to_lower_camel_case();
        let rendered = render_ref(&field.ty, idents)?;
        type_fields.push(format!("{name}: {}", rendered.ty));
        order.push(format!("'{name}'"));
        codecs.push(format!("{name}: {}", rendered.codec));
    }
    let type_fields = type_fields.join(", ");
    let codec = |codec_ty: &str| {
        format!(
            "lib.structCodec<{codec_ty}>([{}], {{{}}})",
            order.join(", "),
            codecs.join(", ")
        )
    };

    let Some(max_param) = max_param_index(code) else {
        return Ok(vec![
            jsdoc(&["Structure with named fields."]),
            format!("export interface {id} {{ {type_fields} }}"),
            jsdoc(&["Codec of the structure."]),
            format!("export const {id}: lib.CodecContainer<{id}> = lib.defineCodec({})", codec(id)),
        ]);
    };

    let generics = (0..=max_param).map(|i| format!("T{i}")).collect::<Vec<_>>().join(", ");
    let with_args = (0..=max_param)
        .map(|i| format!("t{i}: lib.GenCodec<T{i}>"))
        .collect::<Vec<_>>()
        .join(", ");
    let instantiated = format!("{id}<{generics}>");
    Ok(vec![
        jsdoc(&["Structure with named fields and generic parameters."]),
        format!("export interface {instantiated} {{ {type_fields} }}"),
        jsdoc(&["Codec constructor for the structure with generic parameters."]),
        format!(
            "export const {id} = {{ {}",
            jsdoc(&["Create a codec with the actual codecs for generic parameters."])
        ),
        format!(
            "with: <{generics}>({with_args}): lib.GenCodec<{instantiated}> => {} }}",
            codec(&instantiated)
        ),
    ])
}

fn jsdoc(lines: &[&str]) -> String {
    let mut out = String::from("/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */");
    out
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
