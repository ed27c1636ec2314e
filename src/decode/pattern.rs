//! Embedded payload markers inside otherwise plain text.
//!
//! Export tooling wraps inline payloads in one of two marker syntaxes:
//! a `` `!` `` sentinel on both sides of the payload, or a bare `YCFg`
//! prefix running to the end of the base64 character run. Both appear mixed
//! into free text, so extraction substitutes each occurrence in place and
//! leaves the surrounding text alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::decode::decoder;

/// `` `!`payload`!` `` — payload wrapped by a three-character sentinel.
static WRAPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new("`!`([A-Za-z0-9+/=]+)`!`").expect("static pattern compiles"));

/// `YCFgpayload` — fixed prefix, unterminated payload.
static PREFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new("YCFg([A-Za-z0-9+/=]+)").expect("static pattern compiles"));

/// True if either marker syntax occurs anywhere in `text`.
pub fn contains_pattern(text: &str) -> bool {
    WRAPPED.is_match(text) || PREFIXED.is_match(text)
}

/// Replace every marker occurrence with its decoded payload.
///
/// Wrapped markers are substituted first, then prefixed markers, each in a
/// single global pass. Every captured payload is decoded independently via
/// [`decoder::decode`], which preserves the payload on failure.
pub fn extract_and_decode(text: &str) -> String {
    let decoded = WRAPPED.replace_all(text, |caps: &Captures| decoder::decode(&caps[1]));
    PREFIXED
        .replace_all(&decoded, |caps: &Captures| decoder::decode(&caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wrapped_markers() {
        assert!(contains_pattern("before `!`SGVsbG8=`!` after"));
        assert!(!contains_pattern("no markers here"));
    }

    #[test]
    fn detects_prefixed_markers() {
        assert!(contains_pattern("note YCFgSGVsbG8= end"));
    }

    #[test]
    fn decodes_wrapped_marker_in_place() {
        assert_eq!(
            extract_and_decode("say `!`SGVsbG8=`!` loudly"),
            "say Hello loudly"
        );
    }

    #[test]
    fn decodes_prefixed_marker_to_end_of_run() {
        assert_eq!(extract_and_decode("x YCFgSGVsbG8= y"), "x Hello y");
    }

    #[test]
    fn decodes_every_occurrence_independently() {
        let text = "`!`SGVsbG8=`!` and `!`d29ybGQ=`!`";
        assert_eq!(extract_and_decode(text), "Hello and world");
    }

    #[test]
    fn handles_both_marker_kinds_in_one_string() {
        let text = "`!`SGVsbG8=`!` then YCFgd29ybGQ=";
        assert_eq!(extract_and_decode(text), "Hello then world");
    }

    #[test]
    fn undecodable_payload_is_preserved() {
        // Payload has a bad length, so the decoder keeps it as-is.
        assert_eq!(extract_and_decode("`!`SGVsbG8`!`"), "SGVsbG8");
    }

    #[test]
    fn text_without_markers_is_untouched() {
        assert_eq!(extract_and_decode("plain text"), "plain text");
    }
}
