//! Tests for the split CLI command

use advisor::cli::commands::split::{execute, SplitArgs};
use advisor::cli::OutputFormat;

use crate::common::{test_config, DocumentSet};

fn args(file: std::path::PathBuf) -> SplitArgs {
    SplitArgs {
        file,
        chunk_size: None,
        chunk_overlap: None,
        full: false,
    }
}

#[test]
fn test_split_with_config_defaults() {
    let docs = DocumentSet::handbook();
    let result = execute(args(docs.files[0].clone()), &test_config(), OutputFormat::Human);
    assert!(result.is_ok(), "Split should succeed: {:?}", result.err());
}

#[test]
fn test_split_json_with_overrides() {
    let content = "Registration week. ".repeat(40);
    let docs = DocumentSet::with_files(&[("long.md", content.as_str())]);
    let mut split_args = args(docs.files[0].clone());
    split_args.chunk_size = Some(50);
    split_args.chunk_overlap = Some(10);
    split_args.full = true;

    let result = execute(split_args, &test_config(), OutputFormat::Json);
    assert!(result.is_ok());
}

#[test]
fn test_split_rejects_bad_overlap() {
    let docs = DocumentSet::handbook();
    let mut split_args = args(docs.files[0].clone());
    split_args.chunk_size = Some(10);
    split_args.chunk_overlap = Some(10);

    let err = execute(split_args, &test_config(), OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("chunk_overlap"));
}

#[test]
fn test_split_rejects_unsupported_file() {
    let docs = DocumentSet::handbook();
    let slides = docs.path().join("notes/slides.pptx");

    let result = execute(args(slides), &test_config(), OutputFormat::Human);
    assert!(result.is_err());
}

#[test]
fn test_split_missing_file() {
    let result = execute(
        args("/nonexistent/handbook.txt".into()),
        &test_config(),
        OutputFormat::Human,
    );
    assert!(result.is_err());
}
