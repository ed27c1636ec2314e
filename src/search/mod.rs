//! Contextual search over decoded documents.
//!
//! [`search`] walks a decoded tree once, matching a term against text and
//! attribute values, and produces one [`ContextRecord`] per hit. Context
//! (owning workflow, transition, function) is derived by [`context::resolve`]
//! walking upward through an [`AncestorIndex`] built once per pass.

mod ancestors;
pub mod context;
mod indexer;

pub use ancestors::AncestorIndex;
pub use context::{Context, NOT_AVAILABLE};
pub use indexer::{search, ContextRecord};
