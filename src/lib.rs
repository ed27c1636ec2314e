//! wfscan — recover readable content from workflow XML exports.
//!
//! Workflow-management tools export definitions as XML in which scripts,
//! descriptions, and arguments are frequently base64-encoded, sometimes
//! gzipped, and sometimes buried inside free text behind marker syntaxes.
//! This crate decodes those payloads in place and searches the decoded
//! documents, annotating every hit with the workflow, transition, and
//! function it belongs to.
//!
//! Pipeline: parse ([`xml`]) → decode in place ([`decode::transform`]) →
//! search ([`search::search`]) → render ([`report`]).

pub mod decode;
pub mod error;
pub mod report;
pub mod search;
pub mod xml;

pub use error::Error;
