//! End-to-end tests for the parse → decode → search pipeline.

use wfscan::decode;
use wfscan::search::{self, NOT_AVAILABLE};
use wfscan::xml::{parse_str, to_xml_string};

#[test]
fn marker_payload_is_decoded_and_searchable_with_context() {
    // `SGVsbG8=` is "Hello", wrapped in the sentinel marker syntax.
    let mut doc = parse_str(
        "<workflow><action name=\"Resolve\"><results>`!`SGVsbG8=`!`</results></action></workflow>",
    )
    .unwrap();

    decode::transform(&mut doc);

    let action = doc.node(doc.node(doc.root()).children[0]);
    let results = doc.node(action.children[0]);
    assert_eq!(results.text.as_deref(), Some("Hello"));

    let records = search::search(&doc, "Hello", "wf.xml");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].transition, "Resolve");
    assert_eq!(records[0].content, "Hello");
    assert_eq!(records[0].workflow, "wf");
}

#[test]
fn base64_attribute_is_decoded_and_located() {
    // `cGVuZGluZw==` is "pending".
    let mut doc = parse_str(
        "<workflow><step name=\"InProgress\" desc=\"cGVuZGluZw==\"/></workflow>",
    )
    .unwrap();

    decode::transform(&mut doc);

    let step = doc.node(doc.node(doc.root()).children[0]);
    assert_eq!(step.attr("desc"), Some("pending"));

    let records = search::search(&doc, "pending", "states.xml");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].transition, "Step: InProgress");
    assert!(records[0].location.ends_with("/@desc"));
}

#[test]
fn transform_twice_matches_transform_once() {
    let mut doc = parse_str(
        "<workflow><results>SGVsbG8=</results><step desc=\"cGVuZGluZw==\"/></workflow>",
    )
    .unwrap();
    decode::transform(&mut doc);
    let once = to_xml_string(&doc);
    decode::transform(&mut doc);
    assert_eq!(to_xml_string(&doc), once);
}

#[test]
fn search_on_undecoded_context_fields_uses_sentinels() {
    let mut doc = parse_str("<workflow><results>needle</results></workflow>").unwrap();
    decode::transform(&mut doc);
    let records = search::search(&doc, "needle", "wf.xml");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].transition, NOT_AVAILABLE);
    assert_eq!(records[0].function_id, NOT_AVAILABLE);
}

#[test]
fn absent_term_returns_no_records() {
    let mut doc = parse_str("<workflow><results>SGVsbG8=</results></workflow>").unwrap();
    decode::transform(&mut doc);
    assert!(search::search(&doc, "zebra", "wf.xml").is_empty());
}

#[test]
fn nested_function_context_survives_decoding() {
    let mut doc = parse_str(
        "<workflow><action name=\"Escalate\"><post-function class=\"com.acme.NotifyTeam\"><arg name=\"message\">SGVsbG8=</arg></post-function></action></workflow>",
    )
    .unwrap();
    decode::transform(&mut doc);

    let records = search::search(&doc, "Hello", "wf.xml");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].transition, "Escalate");
    assert_eq!(records[0].function_id, "NotifyTeam");
    assert_eq!(records[0].kind, "message");
}
