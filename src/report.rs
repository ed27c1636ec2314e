//! HTML results report.
//!
//! Renders the collected search records as a standalone HTML page: a header
//! with the term and a timestamp, a results table, and the raw records
//! embedded as JSON so the page's export button can produce a plain-text
//! dump without a server round trip.

use anyhow::{Context as _, Result};
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::search::{ContextRecord, NOT_AVAILABLE};

/// Cell truncation widths, matching the table column proportions.
const WORKFLOW_WIDTH: usize = 35;
const TRANSITION_WIDTH: usize = 25;
const FUNCTION_WIDTH: usize = 25;
const CONTENT_WIDTH: usize = 70;

/// Render the report and write it to `path`.
pub fn write_report(path: &Path, term: &str, records: &[ContextRecord]) -> Result<()> {
    let html = render(term, records)?;
    fs::write(path, html).with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}

/// Render the full HTML page.
pub fn render(term: &str, records: &[ContextRecord]) -> Result<String> {
    let data = serde_json::to_string(records).context("failed to serialize search records")?;
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut page = String::new();
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Workflow Search Results</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }}
.container {{ max-width: 1400px; margin: 0 auto; }}
.search-header {{ background-color: #0052cc; color: white; padding: 15px; border-radius: 8px 8px 0 0; }}
.search-header .timestamp {{ font-size: 14px; opacity: 0.9; }}
.results {{ background-color: white; border-radius: 0 0 8px 8px; padding: 20px; }}
table {{ width: 100%; border-collapse: collapse; }}
th {{ background-color: #f7f8f9; color: #172b4d; padding: 12px 8px; text-align: left; border-bottom: 2px solid #dfe1e6; }}
td {{ padding: 10px 8px; border-bottom: 1px solid #dfe1e6; vertical-align: top; font-size: 14px; }}
.workflow-name {{ color: #36b37e; font-weight: 500; }}
.transition-name {{ color: #ff5630; font-weight: 500; }}
.function-id {{ color: #6554c0; font-family: monospace; font-size: 13px; }}
.type-tag {{ background-color: #dfe1e6; color: #5e6c84; padding: 4px 6px; border-radius: 3px; font-size: 11px; }}
.content-snippet {{ background-color: #f4f5f7; padding: 6px 10px; border-radius: 4px; font-family: monospace; font-size: 12px; }}
.highlight {{ background-color: #fff3cd; color: #856404; font-weight: bold; }}
.na-value {{ color: #97a0af; font-style: italic; }}
.no-results {{ text-align: center; color: #6b778c; font-style: italic; padding: 40px; }}
.result-count {{ text-align: right; color: #6b778c; font-size: 14px; margin-top: 20px; }}
.export-button {{ background-color: #0052cc; color: white; padding: 10px 20px; border: none; border-radius: 4px; cursor: pointer; float: right; margin-top: 20px; }}
</style>
<script>
const searchResultsData = {data};
const searchTerm = {term_json};
function exportToText() {{
  let text = 'WORKFLOW SEARCH RESULTS\n=======================\n\n';
  text += 'Search Term: ' + searchTerm + '\n\n';
  searchResultsData.forEach((result, index) => {{
    text += '--- Result ' + (index + 1) + ' ---\n';
    text += 'File: ' + result.filename + '\n';
    text += 'Workflow: ' + result.workflow + '\n';
    text += 'Transition: ' + result.transition + '\n';
    text += 'Function ID: ' + result.function_id + '\n';
    text += 'Type: ' + result.type + '\n';
    text += 'Content: ' + result.content + '\n';
    text += 'Location: ' + result.line + '\n\n';
  }});
  const blob = new Blob([text], {{ type: 'text/plain' }});
  const a = document.createElement('a');
  a.href = window.URL.createObjectURL(blob);
  a.download = 'search_results.txt';
  a.click();
  window.URL.revokeObjectURL(a.href);
}}
</script>
</head>
<body>
<div class="container">
<div class="search-header">
<h2>Search Results for: "{term}"</h2>
<div class="timestamp">Generated on: {generated}</div>
</div>
<div class="results">
"#,
        data = data,
        term_json = serde_json::to_string(term).context("failed to serialize search term")?,
        term = escape(term),
        generated = generated,
    );

    if records.is_empty() {
        let _ = write!(
            page,
            "<div class=\"no-results\">No results found for \"{}\"</div>\n",
            escape(term)
        );
    } else {
        page.push_str(
            "<table>\n<thead><tr><th>Workflow</th><th>Transition</th><th>Function ID</th><th>Type</th><th>Content</th></tr></thead>\n<tbody>\n",
        );
        for record in records {
            page.push_str("<tr>");
            let _ = write!(
                page,
                "<td><span class=\"workflow-name\">{}</span></td>",
                escape(&truncate(&record.workflow, WORKFLOW_WIDTH))
            );
            push_optional_cell(&mut page, &record.transition, "transition-name", TRANSITION_WIDTH);
            push_optional_cell(&mut page, &record.function_id, "function-id", FUNCTION_WIDTH);
            let _ = write!(
                page,
                "<td><span class=\"type-tag\">{}</span></td>",
                escape(&record.kind)
            );
            let _ = write!(
                page,
                "<td><div class=\"content-snippet\">{}</div></td>",
                highlight(&truncate(&record.content, CONTENT_WIDTH), term)
            );
            page.push_str("</tr>\n");
        }
        page.push_str("</tbody>\n</table>\n");
        let _ = write!(
            page,
            "<div class=\"result-count\">Total results found: {}</div>\n",
            records.len()
        );
        page.push_str("<button class=\"export-button\" onclick=\"exportToText()\">Export to Text</button>\n");
    }

    page.push_str("</div>\n</div>\n</body>\n</html>\n");
    Ok(page)
}

/// `N/A` fields render in the muted style instead of their category color.
fn push_optional_cell(page: &mut String, value: &str, class: &str, width: usize) {
    if value == NOT_AVAILABLE {
        let _ = write!(page, "<td><span class=\"na-value\">{}</span></td>", value);
    } else {
        let _ = write!(
            page,
            "<td><span class=\"{}\">{}</span></td>",
            class,
            escape(&truncate(value, width))
        );
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let cut: String = value.chars().take(width).collect();
        format!("{cut}...")
    } else {
        value.to_string()
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape the snippet and wrap occurrences of the term in highlight spans.
/// The literal, lowercase, and uppercase variants are each marked, the same
/// cheap matching the table consumer has always used.
fn highlight(content: &str, term: &str) -> String {
    let mut escaped = escape(content);
    for variant in [term.to_string(), term.to_lowercase(), term.to_uppercase()] {
        if variant.is_empty() {
            continue;
        }
        let marked = format!("<span class=\"highlight\">{}</span>", escape(&variant));
        escaped = escaped.replace(&escape(&variant), &marked);
    }
    escaped
}
