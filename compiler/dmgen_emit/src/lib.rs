//! dmgen emitter: TypeScript sources from the compiled data model.
//!
//! Three modules are rendered:
//!
//! - the data model ([`generate_data_model`]): a type declaration and a codec
//!   per emitted identifier, in dependency order, with shortcut constructors
//!   on enums;
//! - query prototypes ([`generate_prototypes`]): selector ids, selector
//!   outputs, selector and predicate trees per query;
//! - the client find API ([`generate_find_api`]).
//!
//! Codecs are only referenced by name (`lib.structCodec`, `lib.enumCodec`,
//! ...); their implementation lives in the runtime library.

mod data_model;
mod find_api;
mod prototypes;
mod refs;
mod shortcuts;

pub use data_model::{generate_data_model, render_emit};
pub use find_api::generate_find_api;
pub use prototypes::generate_prototypes;
pub use refs::{render_ref, RefRender};
pub use shortcuts::{render_shortcuts, ShortcutsSide};
