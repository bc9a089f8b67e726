//! Resolved type references.

use crate::Ident;

/// Types provided by the codec runtime library.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LibType {
    BytesVec,
    String,
    U8,
    U16,
    U32,
    U64,
    U128,
    NonZero,
    Option,
    Compact,
    Vec,
    BTreeSet,
    BTreeMap,
    Json,
    Bool,
    Timestamp,
    Duration,
    DurationCompact,
    Name,
    CompoundPredicate,
    DomainId,
    AccountId,
    AssetDefinitionId,
    AssetId,
    NftId,
    Algorithm,
    Signature,
    Hash,
    PublicKey,
    BlockSignature,
}

impl LibType {
    /// Name of the type in the runtime library.
    pub fn name(self) -> &'static str {
        match self {
            LibType::BytesVec => "BytesVec",
            LibType::String => "String",
            LibType::U8 => "U8",
            LibType::U16 => "U16",
            LibType::U32 => "U32",
            LibType::U64 => "U64",
            LibType::U128 => "U128",
            LibType::NonZero => "NonZero",
            LibType::Option => "Option",
            LibType::Compact => "Compact",
            LibType::Vec => "Vec",
            LibType::BTreeSet => "BTreeSet",
            LibType::BTreeMap => "BTreeMap",
            LibType::Json => "Json",
            LibType::Bool => "Bool",
            LibType::Timestamp => "Timestamp",
            LibType::Duration => "Duration",
            LibType::DurationCompact => "DurationCompact",
            LibType::Name => "Name",
            LibType::CompoundPredicate => "CompoundPredicate",
            LibType::DomainId => "DomainId",
            LibType::AccountId => "AccountId",
            LibType::AssetDefinitionId => "AssetDefinitionId",
            LibType::AssetId => "AssetId",
            LibType::NftId => "NftId",
            LibType::Algorithm => "Algorithm",
            LibType::Signature => "Signature",
            LibType::Hash => "Hash",
            LibType::PublicKey => "PublicKey",
            LibType::BlockSignature => "BlockSignature",
        }
    }

    /// Fixed-width integer for a schema primitive name (`u8` .. `u128`).
    pub fn from_int_name(name: &str) -> Option<Self> {
        Some(match name {
            "u8" => LibType::U8,
            "u16" => LibType::U16,
            "u32" => LibType::U32,
            "u64" => LibType::U64,
            "u128" => LibType::U128,
            _ => return None,
        })
    }

    /// Schema identifiers mapped one-to-one onto a library type.
    pub fn from_direct_name(name: &str) -> Option<Self> {
        Some(match name {
            "String" => LibType::String,
            "Json" => LibType::Json,
            "Name" => LibType::Name,
            "DomainId" => LibType::DomainId,
            "AccountId" => LibType::AccountId,
            "AssetId" => LibType::AssetId,
            "NftId" => LibType::NftId,
            "AssetDefinitionId" => LibType::AssetDefinitionId,
            "Compact" => LibType::Compact,
            "Algorithm" => LibType::Algorithm,
            "BlockSignature" => LibType::BlockSignature,
            _ => return None,
        })
    }
}

/// Comparators for sets whose ordering is not the element codec's own.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompareFn {
    /// Order permissions by name, then by payload.
    NameThenPayload,
    /// Order by the `index` field.
    ByIndex,
}

/// A resolved reference to a type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeRef {
    /// Type from the runtime library; needs no emission.
    Lib { id: LibType, params: Vec<TypeRef> },
    /// Locally emitted type. `lazy` references must not be followed eagerly.
    Local {
        id: Ident,
        params: Vec<TypeRef>,
        lazy: bool,
    },
    /// Local type reached through the library namespace (query prototypes).
    Foreign { id: Ident, params: Vec<TypeRef> },
    /// Fixed-size array; only exists before emission.
    Array { len: u64, elem: Box<TypeRef> },
    /// Set with a custom element ordering.
    SetWithCmp { elem: Box<TypeRef>, compare: CompareFn },
    /// Result marker; flattened into an `Ok`/`Err` enum by aliases.
    Result { ok: Box<TypeRef>, err: Box<TypeRef> },
    /// Generic placeholder `T{index}`.
    Param(u32),
    /// Unit / no payload.
    Null,
}

impl TypeRef {
    pub fn lib(id: LibType) -> Self {
        TypeRef::Lib {
            id,
            params: Vec::new(),
        }
    }

    pub fn lib_with(id: LibType, params: Vec<TypeRef>) -> Self {
        TypeRef::Lib { id, params }
    }

    /// Non-lazy local reference without generic arguments.
    pub fn local(id: Ident) -> Self {
        TypeRef::Local {
            id,
            params: Vec::new(),
            lazy: false,
        }
    }

    /// Whether this is exactly `id` with no parameters.
    pub fn is_lib(&self, expected: LibType) -> bool {
        matches!(self, TypeRef::Lib { id, params } if *id == expected && params.is_empty())
    }

    /// Local identifier, if this is a local reference.
    pub fn local_id(&self) -> Option<Ident> {
        match self {
            TypeRef::Local { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Rewrite local references as [`TypeRef::Foreign`], recursively through
    /// library and local parameters.
    pub fn into_foreign(self) -> Self {
        fn map_params(params: Vec<TypeRef>) -> Vec<TypeRef> {
            params.into_iter().map(TypeRef::into_foreign).collect()
        }

        match self {
            TypeRef::Local { id, params, .. } => TypeRef::Foreign {
                id,
                params: map_params(params),
            },
            TypeRef::Lib { id, params } => TypeRef::Lib {
                id,
                params: map_params(params),
            },
            other => other,
        }
    }
}
