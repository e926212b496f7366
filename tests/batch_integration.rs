use std::sync::Arc;
use tonescope::batch::{self, BatchConfig, FileStatus, InputKind};
use tonescope::{Analyzer, AnalyzerConfig, Polarity};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{TestFixture, NEGATIVE_TEXT, POSITIVE_HTML};

fn quiet_config(fail_fast: bool) -> BatchConfig {
    BatchConfig {
        fail_fast,
        max_concurrency: 2,
        show_progress: false,
    }
}

#[test]
fn test_collect_inputs_filters_and_sorts() {
    let fixture = TestFixture::new();
    fixture.create_text_file("b/second.txt", "b");
    fixture.create_text_file("a/first.html", "<p>a</p>");
    fixture.create_text_file("a/notes.md", "notes");
    fixture.create_text_file("a/image.png", "not text");

    let inputs = batch::collect_inputs(&[fixture.root_path.clone()]).expect("collection should succeed");
    let names: Vec<String> = inputs
        .iter()
        .map(|p| p.strip_prefix(&fixture.root_path).unwrap().display().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            format!("a{}first.html", std::path::MAIN_SEPARATOR),
            format!("a{}notes.md", std::path::MAIN_SEPARATOR),
            format!("b{}second.txt", std::path::MAIN_SEPARATOR),
        ]
    );
}

#[test]
fn test_collect_inputs_keeps_explicit_files() {
    let fixture = TestFixture::new();
    let odd = fixture.create_text_file("data.log", "fine");
    let inputs = batch::collect_inputs(&[odd.clone()]).expect("collection should succeed");
    assert_eq!(inputs, vec![odd]);
}

#[test]
fn test_collect_inputs_missing_path_fails() {
    let fixture = TestFixture::new();
    let missing = fixture.root_path.join("nope");
    assert!(batch::collect_inputs(&[missing]).is_err());
}

#[tokio::test]
async fn test_analyze_files_mixed_outcomes_in_order() {
    let fixture = TestFixture::new();
    let html = fixture.create_text_file("good.html", POSITIVE_HTML);
    let text = fixture.create_text_file("bad.txt", NEGATIVE_TEXT);
    let broken = fixture.create_file("broken.txt", &[0xFF, 0xFE, 0x00, 0xC3]);

    let analyzer = Arc::new(Analyzer::with_config(AnalyzerConfig::default()));
    let outcomes = batch::analyze_files(
        vec![html.clone(), text.clone(), broken.clone()],
        analyzer,
        quiet_config(false),
    )
    .await
    .expect("batch should complete");

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].path, html.display().to_string());
    assert_eq!(outcomes[0].input_kind, InputKind::Html);
    assert_eq!(outcomes[2].path, broken.display().to_string());

    match &outcomes[0].status {
        FileStatus::Ok { report } => assert_eq!(report.overall.band, Polarity::Positive),
        other => panic!("expected success, got {other:?}"),
    }
    match &outcomes[1].status {
        FileStatus::Ok { report } => assert_eq!(report.overall.band, Polarity::Negative),
        other => panic!("expected success, got {other:?}"),
    }
    match &outcomes[2].status {
        FileStatus::Failed { kind, .. } => assert_eq!(kind, "malformed_input"),
        other => panic!("expected failure, got {other:?}"),
    }

    let summary = batch::summarize(&outcomes);
    assert_eq!(summary.files, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.positive, 1);
    assert_eq!(summary.negative, 1);
    assert_eq!(summary.neutral, 0);
}

#[tokio::test]
async fn test_fail_fast_stops_on_first_failure() {
    let fixture = TestFixture::new();
    let broken = fixture.create_file("broken.html", &[0xC3, 0x28]);
    let fine = fixture.create_text_file("fine.txt", "A calm and ordinary day.");

    let analyzer = Arc::new(Analyzer::default());
    let result = batch::analyze_files(vec![broken, fine], analyzer, quiet_config(true)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_file_reported_as_io_failure() {
    let fixture = TestFixture::new();
    let missing = fixture.root_path.join("gone.txt");

    let outcome = batch::analyze_file(missing, Arc::new(Analyzer::default())).await;
    assert!(!outcome.is_ok());
    match outcome.status {
        FileStatus::Failed { kind, .. } => assert_eq!(kind, "io"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_outcome_json_lines() {
    let fixture = TestFixture::new();
    let path = fixture.create_text_file("one.txt", "I love this! Amazing!");

    let outcome = batch::analyze_file(path, Arc::new(Analyzer::default())).await;
    let json = serde_json::to_value(&outcome).expect("outcome serializes");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["input"], "text");
    assert_eq!(json["report"]["overall"]["band"], "positive");
}
