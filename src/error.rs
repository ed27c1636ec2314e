//! Error types for document processing.
//!
//! Decoding failures are deliberately not represented here: payload decoding
//! is total and degrades to preserving the original value (see
//! [`crate::decode::decode`]). Only loading and writing documents can fail
//! in a way callers need to handle.

use std::path::PathBuf;

/// Errors produced while loading or writing workflow documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is not well formed XML.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading or writing a file failed.
    #[error("{}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
