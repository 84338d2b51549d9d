mod common;

use clap::Parser;
use std::sync::Arc;
use tempfile::tempdir;

use common::{test_state, MockTextGenerator};
use legaldraft::cli::{run, CliArgs};

fn nda_args(extra: &[&str]) -> CliArgs {
    let mut argv = vec![
        "legaldraft",
        "--type",
        "nda",
        "--party-a",
        "Acme Inc",
        "--party-b",
        "Globex Corp",
        "--effective-date",
        "2024-01-01",
    ];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn test_cli_prints_document() {
    let dir = tempdir().unwrap();
    let backend = Arc::new(MockTextGenerator::replying("unused"));
    let state = test_state(dir.path(), backend.clone());

    let mut out = Vec::new();
    run(&nda_args(&["--no-enhance"]), &state, &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("MUTUAL NON-DISCLOSURE AGREEMENT"));
    assert!(printed.contains("Acme Inc"));
    assert!(printed.contains("US-CA"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_cli_writes_text_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("nda.txt");
    let state = test_state(dir.path(), Arc::new(MockTextGenerator::replying("Polished NDA")));

    let output_arg = output.to_string_lossy().to_string();
    let mut out = Vec::new();
    run(&nda_args(&["--output", &output_arg]), &state, &mut out)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Polished NDA");
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Document saved to"));
    assert!(printed.contains("nda.txt"));
}

#[tokio::test]
async fn test_cli_writes_pdf_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("nda.pdf");
    let state = test_state(dir.path(), Arc::new(MockTextGenerator::replying("unused")));

    let output_arg = output.to_string_lossy().to_string();
    let mut out = Vec::new();
    run(
        &nda_args(&["--no-enhance", "--output", &output_arg]),
        &state,
        &mut out,
    )
    .await
    .unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_cli_jurisdiction_flag() {
    let dir = tempdir().unwrap();
    let state = test_state(dir.path(), Arc::new(MockTextGenerator::replying("unused")));

    let mut out = Vec::new();
    run(
        &nda_args(&["--no-enhance", "--jurisdiction", "US-NY"]),
        &state,
        &mut out,
    )
    .await
    .unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("US-NY"));
    assert!(!printed.contains("US-CA"));
}

#[tokio::test]
async fn test_cli_missing_variables_is_an_error() {
    let dir = tempdir().unwrap();
    let state = test_state(dir.path(), Arc::new(MockTextGenerator::replying("unused")));
    let args = CliArgs::try_parse_from([
        "legaldraft",
        "--type",
        "employment",
        "--employee-name",
        "Jane Smith",
        "--no-enhance",
    ])
    .unwrap();

    let mut out = Vec::new();
    let err = run(&args, &state, &mut out).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Missing required variables"));
    assert!(message.contains("position"));
    assert!(message.contains("salary"));
    assert!(out.is_empty());
}
