//! Rendering of type references.

use dmgen_ir::{CodegenError, CompareFn, IdentTable, TypeRef};

/// A reference rendered three ways.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefRender {
    /// TypeScript type expression.
    pub ty: String,
    /// Codec expression.
    pub codec: String,
    /// Value that already is a codec container, when the reference names one
    /// directly. Aliases re-export it instead of wrapping the codec.
    pub value_id: Option<String>,
}

impl RefRender {
    fn plain(ty: String, codec: String) -> Self {
        Self {
            ty,
            codec,
            value_id: None,
        }
    }
}

/// Render `ty`. Array and result markers never survive materialization and
/// are rejected.
pub fn render_ref(ty: &TypeRef, idents: &IdentTable) -> Result<RefRender, CodegenError> {
    match ty {
        TypeRef::Local { id, params, lazy } => {
            let name = idents.name(*id);
            let (ty, codec) = if params.is_empty() {
                (name.to_owned(), format!("lib.getCodec({name})"))
            } else {
                let (types, codecs) = render_params(params, idents)?;
                (format!("{name}<{types}>"), format!("{name}.with({codecs})"))
            };
            if *lazy {
                Ok(RefRender::plain(ty, format!("lib.lazyCodec(() => {codec})")))
            } else if params.is_empty() {
                Ok(RefRender {
                    ty,
                    codec,
                    value_id: Some(name.to_owned()),
                })
            } else {
                Ok(RefRender {
                    ty,
                    value_id: Some(codec.clone()),
                    codec,
                })
            }
        }
        TypeRef::Lib { id, params } => render_lib(id.name(), params, idents),
        TypeRef::Foreign { id, params } => render_lib(idents.name(*id), params, idents),
        TypeRef::SetWithCmp { elem, compare } => {
            let elem = render_ref(elem, idents)?;
            Ok(RefRender::plain(
                format!("lib.BTreeSet<{}>", elem.ty),
                format!("lib.BTreeSet.withCmp({}, {})", elem.codec, compare_fn(*compare)),
            ))
        }
        TypeRef::Param(index) => Ok(RefRender::plain(format!("T{index}"), format!("t{index}"))),
        TypeRef::Null => Ok(RefRender::plain("null".into(), "lib.nullCodec".into())),
        TypeRef::Array { len, .. } => Err(CodegenError::unexpected_shape(
            format!("[_; {len}]"),
            "fixed-size array left unexpanded",
        )),
        TypeRef::Result { .. } => Err(CodegenError::unexpected_shape(
            "Result",
            "result outside of a flattened alias",
        )),
    }
}

fn render_lib(name: &str, params: &[TypeRef], idents: &IdentTable) -> Result<RefRender, CodegenError> {
    if params.is_empty() {
        return Ok(RefRender {
            ty: format!("lib.{name}"),
            codec: format!("lib.getCodec(lib.{name})"),
            value_id: Some(format!("lib.{name}")),
        });
    }
    let (types, codecs) = render_params(params, idents)?;
    Ok(RefRender::plain(
        format!("lib.{name}<{types}>"),
        format!("lib.{name}.with({codecs})"),
    ))
}

/// Comma-separated types and codecs of generic arguments.
fn render_params(params: &[TypeRef], idents: &IdentTable) -> Result<(String, String), CodegenError> {
    let rendered = params
        .iter()
        .map(|param| render_ref(param, idents))
        .collect::<Result<Vec<_>, _>>()?;
    let types = rendered.iter().map(|r| r.ty.as_str()).collect::<Vec<_>>().join(", ");
    let codecs = rendered.iter().map(|r| r.codec.as_str()).collect::<Vec<_>>().join(", ");
    Ok((types, codecs))
}

fn compare_fn(compare: CompareFn) -> &'static str {
    match compare {
        CompareFn::NameThenPayload => {
            "(a, b) => { const names = lib.ordCompare(a.name, b.name); \
             if (names !== 0) return names; \
             return lib.ordCompare(a.payload, b.payload) }"
        }
        CompareFn::ByIndex => "(a, b) => lib.ordCompare(a.index, b.index)",
    }
}
