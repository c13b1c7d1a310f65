use std::io::Write;

use url::Url;

use crate::fetch::{self, FetchError, FetchOptions, FetchOutcome, Source};

#[test]
fn empty_input_never_reaches_the_network() {
    // Source resolution fails before any client is built.
    assert!(matches!(
        fetch::resolve_source("", Some("https://example.test/render")),
        Err(FetchError::EmptyInput)
    ));
    assert!(matches!(
        fetch::resolve_source("\t  \n", None),
        Err(FetchError::EmptyInput)
    ));
}

#[test]
fn escaped_table_with_resolved_homepage() {
    let outcome = fetch::parse_outcome(
        r#"{"Mainline":{"Table":{"Row":[{"Company":"<A&B>","HomePage":"page.html"}]}}}"#,
        Some(Url::parse("https://x.test/data.json").unwrap()),
    )
    .unwrap();
    let table = match outcome {
        FetchOutcome::Table(table) => table,
        FetchOutcome::Empty { .. } => panic!("expected a table"),
    };
    let records = crate::output::build_records(&table.rows, table.base_url.as_ref());
    assert_eq!(records[0].homepage.as_deref(), Some("https://x.test/page.html"));

    let html = crate::output::table::render_table(&table.headers, &records);
    assert!(html.contains("&lt;A&amp;B&gt;"));
    assert!(html.contains(r#"href="https://x.test/page.html""#));
    assert!(!html.contains("<A&B>"));
}

#[test]
fn parse_failure_and_network_failure_stay_distinct() {
    let parse_err = fetch::parse_outcome("not json at all", None).unwrap_err();
    assert!(matches!(parse_err, FetchError::InvalidJson { .. }));
    let network_err = FetchError::Network { status: 503 };
    assert_ne!(parse_err.to_string(), network_err.to_string());
    assert!(network_err.to_string().contains("503"));
}

#[test]
fn document_headers_follow_the_source_when_present() {
    let outcome = fetch::parse_outcome(
        r#"{"Mainline":{"Table":{
            "Header":{"Data":["One","Two","Three"]},
            "Row":[{"Company":"Acme"}]
        }}}"#,
        None,
    )
    .unwrap();
    match outcome {
        FetchOutcome::Table(table) => {
            assert_eq!(table.headers, vec!["One", "Two", "Three"]);
        }
        FetchOutcome::Empty { .. } => panic!("expected a table"),
    }
}

#[tokio::test]
async fn local_files_load_with_a_file_base_url() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        file,
        r#"{{"Mainline":{{"Table":{{"Row":[{{"Company":"Acme","Logo":"logo.png"}}]}}}}}}"#
    )
    .unwrap();

    let source = Source::Local(file.path().to_path_buf());
    let outcome = fetch::load(&source, &FetchOptions::default()).await.unwrap();
    let table = match outcome {
        FetchOutcome::Table(table) => table,
        FetchOutcome::Empty { .. } => panic!("expected a table"),
    };

    let base = table.base_url.expect("local files resolve to a file:// base");
    assert_eq!(base.scheme(), "file");

    // A relative logo resolves next to the data file.
    let records = crate::output::build_records(&table.rows, Some(&base));
    let logo = records[0].logo.as_deref().unwrap();
    assert!(logo.starts_with("file://"));
    assert!(logo.ends_with("/logo.png"));
}

#[tokio::test]
async fn missing_local_file_reports_the_path() {
    let source = Source::Local("definitely-not-here.json".into());
    let err = fetch::load(&source, &FetchOptions::default())
        .await
        .unwrap_err();
    match err {
        FetchError::FileRead { path, .. } => assert_eq!(path, "definitely-not-here.json"),
        other => panic!("expected FileRead, got {other}"),
    }
}

#[tokio::test]
async fn empty_feed_round_trips_to_a_message_document() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(file, r#"{{"Mainline":{{"Table":{{"Row":[]}}}}}}"#).unwrap();

    let source = Source::Local(file.path().to_path_buf());
    let outcome = fetch::load(&source, &FetchOptions::default()).await.unwrap();
    assert!(matches!(outcome, FetchOutcome::Empty { .. }));

    let doc =
        crate::output::table::render_message_document("No trucking companies found in the JSON file.");
    assert!(doc.contains("No trucking companies found in the JSON file."));
    assert!(!doc.contains("<table"));
}
