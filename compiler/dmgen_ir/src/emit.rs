//! Materialized type shapes and the emission arena.

use crate::{Ident, IdentTable, LibType, TypeRef};

/// Named struct field.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EmitField {
    pub name: String,
    pub ty: TypeRef,
}

/// Enum variant. `ty` is [`TypeRef::Null`] for unit variants.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EmitVariant {
    pub tag: String,
    pub discriminant: u32,
    pub ty: TypeRef,
}

/// Named bit of a bitmap.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitMask {
    pub name: String,
    pub mask: u64,
}

/// Shape of a locally emitted type.
///
/// Two instantiations of the same generic identifier produce equal
/// `EmitCode`s: generic arguments only ever appear as [`TypeRef::Param`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EmitCode {
    Enum { variants: Vec<EmitVariant> },
    Struct { fields: Vec<EmitField> },
    Tuple { elements: Vec<TypeRef> },
    Bitmap { repr: LibType, masks: Vec<BitMask> },
    Alias { to: TypeRef },
}

impl EmitCode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            EmitCode::Enum { .. } => "enum",
            EmitCode::Struct { .. } => "struct",
            EmitCode::Tuple { .. } => "tuple",
            EmitCode::Bitmap { .. } => "bitmap",
            EmitCode::Alias { .. } => "alias",
        }
    }
}

/// Arena of emitted shapes indexed by [`Ident`].
///
/// Owns the ident table. Iteration follows first-insertion order;
/// replacing a code keeps its position.
#[derive(Clone, Debug, Default)]
pub struct EmitMap {
    idents: IdentTable,
    codes: Vec<Option<EmitCode>>,
    order: Vec<Ident>,
}

impl EmitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an identifier (it need not have a code yet).
    pub fn intern(&mut self, name: &str) -> Ident {
        self.idents.intern(name)
    }

    /// Non-lazy local reference to `name`, interning it.
    pub fn local_ref(&mut self, name: &str) -> TypeRef {
        TypeRef::local(self.intern(name))
    }

    pub fn ident(&self, name: &str) -> Option<Ident> {
        self.idents.get(name)
    }

    pub fn name(&self, ident: Ident) -> &str {
        self.idents.name(ident)
    }

    pub fn idents(&self) -> &IdentTable {
        &self.idents
    }

    pub fn get(&self, ident: Ident) -> Option<&EmitCode> {
        self.codes.get(ident.index()).and_then(Option::as_ref)
    }

    pub fn contains(&self, ident: Ident) -> bool {
        self.get(ident).is_some()
    }

    /// Store `code` for `ident`, returning the previous code if any.
    pub fn insert(&mut self, ident: Ident, code: EmitCode) -> Option<EmitCode> {
        if self.codes.len() <= ident.index() {
            self.codes.resize(ident.index() + 1, None);
        }
        let previous = self.codes[ident.index()].replace(code);
        if previous.is_none() {
            self.order.push(ident);
        }
        previous
    }

    /// Intern `name` and store `code` for it.
    pub fn insert_named(&mut self, name: &str, code: EmitCode) -> Ident {
        let ident = self.intern(name);
        self.insert(ident, code);
        ident
    }

    /// Identifiers with a code, in insertion order.
    pub fn idents_in_order(&self) -> &[Ident] {
        &self.order
    }

    /// `(ident, code)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Ident, &EmitCode)> {
        self.order
            .iter()
            .filter_map(|&ident| self.get(ident).map(|code| (ident, code)))
    }

    /// Number of identifiers with a code.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    fn unit_enum(tag: &str) -> EmitCode {
        EmitCode::Enum {
            variants: vec![EmitVariant {
                tag: tag.into(),
                discriminant: 0,
                ty: TypeRef::Null,
            }],
        }
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = EmitMap::new();
        // Interning order differs from insertion order on purpose.
        let b = map.intern("B");
        let a = map.intern("A");
        map.insert(a, unit_enum("X"));
        map.insert(b, unit_enum("Y"));
        let order: Vec<_> = map.iter().map(|(ident, _)| map.name(ident)).collect();
        assert_eq!(order, ["A", "B"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut map = EmitMap::new();
        let a = map.insert_named("A", unit_enum("X"));
        map.insert_named("B", unit_enum("Y"));
        let previous = map.insert(a, EmitCode::Enum { variants: vec![] });
        assert_eq!(previous, Some(unit_enum("X")));
        assert_eq!(map.idents_in_order(), &[a, map.ident("B").unwrap()]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn interned_without_code_is_absent() {
        let mut map = EmitMap::new();
        let ghost = map.intern("Ghost");
        assert!(!map.contains(ghost));
        assert_eq!(map.ident("Ghost"), Some(ghost));
        assert!(map.get(ghost).is_none());
        assert!(map.is_empty());
    }
}
