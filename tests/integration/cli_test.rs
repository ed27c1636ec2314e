//! CLI tests driving the compiled binary against temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    input: std::path::PathBuf,
    output: std::path::PathBuf,
    report: std::path::PathBuf,
}

fn workspace() -> Workspace {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("xml");
    let output = dir.path().join("xml-decoded");
    let report = dir.path().join("result.html");
    fs::create_dir(&input).unwrap();
    Workspace {
        _dir: dir,
        input,
        output,
        report,
    }
}

fn wfscan(ws: &Workspace) -> Command {
    let mut cmd = Command::cargo_bin("wfscan").unwrap();
    cmd.arg("--input-dir")
        .arg(&ws.input)
        .arg("--output-dir")
        .arg(&ws.output)
        .arg("--report")
        .arg(&ws.report);
    cmd
}

#[test]
fn decodes_documents_and_writes_decoded_copies() {
    let ws = workspace();
    fs::write(
        ws.input.join("flow.xml"),
        "<workflow><results>SGVsbG8=</results></workflow>",
    )
    .unwrap();

    wfscan(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files successfully."));

    let decoded = fs::read_to_string(ws.output.join("flow-decoded.xml")).unwrap();
    assert!(decoded.contains("<results>Hello</results>"));
}

#[test]
fn search_term_produces_a_report() {
    let ws = workspace();
    fs::write(
        ws.input.join("flow.xml"),
        "<workflow><action name=\"Resolve\"><results>`!`SGVsbG8=`!`</results></action></workflow>",
    )
    .unwrap();

    wfscan(&ws)
        .arg("Hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 'Hello' in 1 file(s):"))
        .stdout(predicate::str::contains("flow.xml"));

    let report = fs::read_to_string(&ws.report).unwrap();
    assert!(report.contains("Resolve"));
    assert!(report.contains("Total results found: 1"));
}

#[test]
fn unparseable_document_is_skipped_not_fatal() {
    let ws = workspace();
    fs::write(ws.input.join("bad.xml"), "<workflow><unclosed>").unwrap();
    fs::write(
        ws.input.join("good.xml"),
        "<workflow><results>findme</results></workflow>",
    )
    .unwrap();

    wfscan(&ws)
        .arg("findme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files successfully."))
        .stdout(predicate::str::contains("good.xml"));

    assert!(!ws.output.join("bad-decoded.xml").exists());
    assert!(ws.output.join("good-decoded.xml").exists());
}

#[test]
fn empty_input_directory_reports_and_exits_cleanly() {
    let ws = workspace();
    wfscan(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("No XML files found"));
    assert!(!ws.report.exists());
}

#[test]
fn output_directory_is_cleared_between_runs() {
    let ws = workspace();
    fs::create_dir(&ws.output).unwrap();
    fs::write(ws.output.join("stale-decoded.xml"), "old").unwrap();
    fs::write(
        ws.input.join("flow.xml"),
        "<workflow><results>text</results></workflow>",
    )
    .unwrap();

    wfscan(&ws).assert().success();

    assert!(!ws.output.join("stale-decoded.xml").exists());
    assert!(ws.output.join("flow-decoded.xml").exists());
}

#[test]
fn search_with_no_hits_still_writes_the_report() {
    let ws = workspace();
    fs::write(
        ws.input.join("flow.xml"),
        "<workflow><results>nothing relevant</results></workflow>",
    )
    .unwrap();

    wfscan(&ws)
        .arg("absent-term")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found in any file"));

    let report = fs::read_to_string(&ws.report).unwrap();
    assert!(report.contains("No results found"));
}

#[test]
fn non_xml_files_are_ignored() {
    let ws = workspace();
    fs::write(ws.input.join("notes.txt"), "not xml").unwrap();
    wfscan(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("No XML files found"));
}
