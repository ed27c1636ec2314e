//! Payload recovery engine.
//!
//! Three small pieces that cooperate to turn encoded workflow exports back
//! into readable documents:
//!
//! - [`is_base64`] decides whether a whole string is plausibly base64.
//! - [`decode`] turns a payload into text with layered fallbacks for gzip
//!   and legacy character encodings; it never fails.
//! - [`contains_pattern`] / [`extract_and_decode`] handle payloads embedded
//!   in larger text behind marker syntaxes.
//! - [`transform`] applies all of the above to every node of a parsed tree,
//!   in place.

mod classifier;
mod decoder;
mod pattern;
mod transform;

pub use classifier::is_base64;
pub use decoder::decode;
pub use pattern::{contains_pattern, extract_and_decode};
pub use transform::transform;
