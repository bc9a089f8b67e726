//! Schema entry shapes.

use serde::Deserialize;

/// A named struct field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StructField {
    pub name: String,
    /// Canonical reference string of the field type.
    #[serde(rename = "type")]
    pub ty: String,
}

/// A tagged enum variant with an optional payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EnumVariant {
    pub tag: String,
    pub discriminant: u32,
    /// Payload type; `None` for unit variants.
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
}

/// A named bit of a bitmap.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BitmapMask {
    pub name: String,
    pub mask: u64,
}

/// Raw shape of a single schema entry.
///
/// Read-only input: produced by the upstream protocol tool and never mutated
/// during compilation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEntry")]
pub enum SchemaEntry {
    /// `null`: the unit type.
    Unit,
    /// A bare string: direct alias of another reference.
    Alias(String),
    Struct(Vec<StructField>),
    Enum(Vec<EnumVariant>),
    Bitmap {
        repr: String,
        masks: Vec<BitmapMask>,
    },
    Tuple(Vec<String>),
    Array {
        len: u64,
        ty: String,
    },
    Map {
        key: String,
        value: String,
    },
    Vec(String),
    Option(String),
    /// Integer encoding kind, e.g. `FixedWidth`.
    Int(String),
    Result {
        ok: String,
        err: String,
    },
}

/// Borrowed view of a [`SchemaEntry`] with slices instead of vectors.
///
/// Lets shape rules use slice patterns (`ShapeView::Struct([a, b])`) so that
/// rule order can be written directly as match-arm order.
#[derive(Copy, Clone, Debug)]
pub enum ShapeView<'a> {
    Unit,
    Alias(&'a str),
    Struct(&'a [StructField]),
    Enum(&'a [EnumVariant]),
    Bitmap {
        repr: &'a str,
        masks: &'a [BitmapMask],
    },
    Tuple(&'a [String]),
    Array {
        len: u64,
        ty: &'a str,
    },
    Map {
        key: &'a str,
        value: &'a str,
    },
    Vec(&'a str),
    Option(&'a str),
    Int(&'a str),
    Result {
        ok: &'a str,
        err: &'a str,
    },
}

impl SchemaEntry {
    /// Borrow this entry as a [`ShapeView`].
    pub fn view(&self) -> ShapeView<'_> {
        match self {
            SchemaEntry::Unit => ShapeView::Unit,
            SchemaEntry::Alias(target) => ShapeView::Alias(target),
            SchemaEntry::Struct(fields) => ShapeView::Struct(fields),
            SchemaEntry::Enum(variants) => ShapeView::Enum(variants),
            SchemaEntry::Bitmap { repr, masks } => ShapeView::Bitmap { repr, masks },
            SchemaEntry::Tuple(items) => ShapeView::Tuple(items),
            SchemaEntry::Array { len, ty } => ShapeView::Array { len: *len, ty },
            SchemaEntry::Map { key, value } => ShapeView::Map { key, value },
            SchemaEntry::Vec(item) => ShapeView::Vec(item),
            SchemaEntry::Option(item) => ShapeView::Option(item),
            SchemaEntry::Int(kind) => ShapeView::Int(kind),
            SchemaEntry::Result { ok, err } => ShapeView::Result { ok, err },
        }
    }
}

// Wire representation: `null`, a bare string, or a single-key object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Unit(()),
    Alias(String),
    Shape(RawShape),
}

#[derive(Deserialize)]
enum RawShape {
    Struct(Vec<StructField>),
    Enum(Vec<EnumVariant>),
    Bitmap {
        repr: String,
        masks: Vec<BitmapMask>,
    },
    Tuple(Vec<String>),
    Array {
        len: u64,
        #[serde(rename = "type")]
        ty: String,
    },
    Map {
        key: String,
        value: String,
    },
    Vec(String),
    Option(String),
    Int(String),
    Result {
        ok: String,
        err: String,
    },
}

impl From<RawEntry> for SchemaEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Unit(()) => SchemaEntry::Unit,
            RawEntry::Alias(target) => SchemaEntry::Alias(target),
            RawEntry::Shape(shape) => match shape {
                RawShape::Struct(fields) => SchemaEntry::Struct(fields),
                RawShape::Enum(variants) => SchemaEntry::Enum(variants),
                RawShape::Bitmap { repr, masks } => SchemaEntry::Bitmap { repr, masks },
                RawShape::Tuple(items) => SchemaEntry::Tuple(items),
                RawShape::Array { len, ty } => SchemaEntry::Array { len, ty },
                RawShape::Map { key, value } => SchemaEntry::Map { key, value },
                RawShape::Vec(item) => SchemaEntry::Vec(item),
                RawShape::Option(item) => SchemaEntry::Option(item),
                RawShape::Int(kind) => SchemaEntry::Int(kind),
                RawShape::Result { ok, err } => SchemaEntry::Result { ok, err },
            },
        }
    }
}
