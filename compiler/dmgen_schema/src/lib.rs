//! Raw wire-format schema model.
//!
//! The schema is an externally produced JSON document mapping every canonical
//! reference string (`SortedMap<AccountId, Asset>`, `InstructionBox`, ...) to a
//! raw shape description. This crate only models and loads it; interpretation
//! happens in `dmgen_resolve`.
//!
//! # Shapes
//!
//! Every entry is one of a closed set of shapes (see [`SchemaEntry`]):
//! - `null` for unit types
//! - a bare string for a direct alias
//! - a single-key object (`Struct`, `Enum`, `Bitmap`, `Tuple`, `Array`,
//!   `Map`, `Vec`, `Option`, `Int`, `Result`) for everything else
//!
//! Entries are kept in the order the document declares them, so every
//! consumer iterates them deterministically and in upstream order.

mod entry;
mod error;
mod schema;

pub use entry::{BitmapMask, EnumVariant, SchemaEntry, ShapeView, StructField};
pub use error::SchemaError;
pub use schema::Schema;
