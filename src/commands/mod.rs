//! End-to-end run orchestration for the CLI.
//!
//! Processes every XML export in the input directory: parse, decode in
//! place, write a `-decoded` copy. Documents that fail to parse are logged
//! and skipped; they never abort the batch. With a search term the decoded
//! trees are then searched in input order and the combined results rendered
//! to the HTML report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use wfscan::xml::Document;
use wfscan::{decode, report, search};

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    clear_output_dir(&cli.output_dir)?;

    let files = collect_xml_files(&cli.input_dir)?;
    if files.is_empty() {
        println!("No XML files found in {}", cli.input_dir.display());
        return Ok(());
    }
    println!("Found {} XML files to process.", files.len());

    // Decoded trees in input order; parse failures drop out here and are
    // excluded from the search phase.
    let mut decoded: Vec<(String, Document)> = Vec::new();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match process_file(path, &cli.output_dir) {
            Ok(doc) => decoded.push((name, doc)),
            Err(err) => warn!(file = %path.display(), %err, "skipping document"),
        }
    }
    println!("Processed {} files successfully.", decoded.len());

    match &cli.term {
        Some(term) => {
            println!("\nSearching for '{term}'...");
            let mut all_results = Vec::new();
            let mut found_in = Vec::new();
            for (name, doc) in &decoded {
                let results = search::search(doc, term, name);
                debug!(file = %name, hits = results.len(), "searched document");
                if !results.is_empty() {
                    found_in.push(name.clone());
                    all_results.extend(results);
                }
            }

            report::write_report(&cli.report, term, &all_results)?;
            println!("Results written to {}", cli.report.display());

            if found_in.is_empty() {
                println!("'{term}' not found in any file.");
            } else {
                println!("Found '{term}' in {} file(s):", found_in.len());
                for name in &found_in {
                    println!("  - {name}");
                }
            }
        }
        None => {
            println!("\nNo search term provided. Processing complete.");
            println!("To search, run: wfscan <search_term>");
        }
    }

    Ok(())
}

/// Parse one export, decode it in place, and write the decoded copy as
/// `<stem>-decoded.xml` in the output directory.
fn process_file(path: &Path, output_dir: &Path) -> Result<Document> {
    let mut doc = wfscan::xml::parse_file(path)
        .with_context(|| format!("failed to process {}", path.display()))?;

    decode::transform(&mut doc);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let out_path = output_dir.join(format!("{stem}-decoded.xml"));
    fs::write(&out_path, wfscan::xml::to_xml_string(&doc))
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(from = %path.display(), to = %out_path.display(), "processed document");

    Ok(doc)
}

/// Remove stale files from the output directory, creating it if missing.
fn clear_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        return Ok(());
    }
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())
                .with_context(|| format!("failed to delete {}", entry.path().display()))?;
            debug!(file = %entry.path().display(), "cleared stale output");
        }
    }
    Ok(())
}

/// All `*.xml` files directly inside `dir`, sorted by name so batch output
/// order is stable across platforms.
fn collect_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    // A missing input directory is the same no-input condition as an empty
    // one: report and stop, don't crash.
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read input directory {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    files.sort();
    Ok(files)
}
