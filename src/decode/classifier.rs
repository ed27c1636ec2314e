//! Classifies whether a string is plausibly a whole base64 payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

/// The standard base64 alphabet plus padding, nothing else.
static BASE64_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/=]+$").expect("static pattern compiles"));

/// Returns true iff `s` looks like a complete base64 payload: non-empty,
/// entirely within the base64 alphabet, length a multiple of four, and
/// accepted by a strict decode (padding and alphabet enforced).
///
/// The empty string is never classified as base64; there is nothing to
/// recover from it and treating it as encoded would make every empty
/// attribute decode-eligible.
pub fn is_base64(s: &str) -> bool {
    !s.is_empty() && s.len() % 4 == 0 && BASE64_SHAPE.is_match(s) && STANDARD.decode(s).is_ok()
}
