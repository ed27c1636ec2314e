//! Base64 payload decoding with layered recovery fallbacks.
//!
//! Real workflow exports contain payloads that are plain UTF-8, gzipped,
//! or produced by tools with legacy single-byte encodings. [`decode`] works
//! through those cases in order and never fails: when nothing applies, the
//! caller gets the original string back and a log line explains why.

use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chardetng::EncodingDetector;
use flate2::read::GzDecoder;
use tracing::{error, warn};

/// Character encodings tried after UTF-8 and automatic detection, in order.
const FALLBACK_ENCODINGS: &[&str] = &["latin-1", "windows-1252", "iso-8859-1", "utf-16"];

/// Decode a base64 payload into text. Total: always returns a string.
///
/// Recovery order:
/// 1. Base64 decode; malformed input logs an error and returns `encoded`.
/// 2. Gzip decompression of the decoded bytes, kept only if it succeeds.
/// 3. UTF-8.
/// 4. Detected charset (chardetng), accepted only if it decodes cleanly.
/// 5. Fixed fallback encodings ([`FALLBACK_ENCODINGS`]).
/// 6. Exhausted: logs a warning and returns `encoded`.
pub fn decode(encoded: &str) -> String {
    let bytes = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(%err, "could not decode base64 payload, keeping original");
            return encoded.to_string();
        }
    };

    // A gzipped payload inside base64 is common for large workflow scripts.
    // Failure here just means the bytes were never compressed.
    let bytes = gunzip(&bytes).unwrap_or(bytes);

    let bytes = match String::from_utf8(bytes) {
        Ok(text) => return text,
        Err(err) => err.into_bytes(),
    };

    let mut detector = EncodingDetector::new();
    detector.feed(&bytes, true);
    let detected = detector.guess(None, true);
    let (text, _, had_errors) = detected.decode(&bytes);
    if !had_errors {
        return text.into_owned();
    }

    for label in FALLBACK_ENCODINGS {
        if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (text, _, had_errors) = encoding.decode(&bytes);
            if !had_errors {
                return text.into_owned();
            }
        }
    }

    warn!("could not decode base64 payload with any known encoding, keeping original");
    encoded.to_string()
}

fn gunzip(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).ok()?;
    Some(out)
}
