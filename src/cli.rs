//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Decode base64 payloads in workflow XML exports, write decoded copies,
/// and optionally search the decoded content.
#[derive(Debug, Parser)]
#[command(name = "wfscan", version, about)]
pub struct Cli {
    /// Term to search for across the decoded documents. Without a term the
    /// run stops after writing the decoded copies.
    pub term: Option<String>,

    /// Directory containing the workflow XML exports.
    #[arg(long, default_value = "./xml")]
    pub input_dir: PathBuf,

    /// Directory for decoded copies. Cleared at the start of every run.
    #[arg(long, default_value = "./xml-decoded")]
    pub output_dir: PathBuf,

    /// Path of the HTML results report, written when a term is given.
    #[arg(long, default_value = "./result.html")]
    pub report: PathBuf,
}
