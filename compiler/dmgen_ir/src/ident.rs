//! Interned identifiers of locally emitted types.

use std::fmt;

use rustc_hash::FxHashMap;

/// Interned identifier of a local type (`AccountId`, `InstructionBox`, ...).
///
/// A plain index into the [`IdentTable`] that created it. Stable for the
/// whole compilation; the emission arena is indexed by it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Ident(u32);

impl Ident {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", self.0)
    }
}

/// Append-only string interner for [`Ident`]s.
#[derive(Clone, Debug, Default)]
pub struct IdentTable {
    names: Vec<String>,
    index: FxHashMap<String, Ident>,
}

impl IdentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing ident if already known.
    pub fn intern(&mut self, name: &str) -> Ident {
        if let Some(&ident) = self.index.get(name) {
            return ident;
        }
        debug_assert!(u32::try_from(self.names.len()).is_ok(), "ident table overflow");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a schema has far fewer than u32::MAX identifiers"
        )]
        let ident = Ident(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), ident);
        ident
    }

    /// Look up an already interned name.
    pub fn get(&self, name: &str) -> Option<Ident> {
        self.index.get(name).copied()
    }

    /// Name of an ident created by this table.
    pub fn name(&self, ident: Ident) -> &str {
        &self.names[ident.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
