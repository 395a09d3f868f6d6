//! Tests for the search CLI command
//!
//! - Matches found in an indexed directory
//! - Empty results
//! - Invalid limits and queries

use advisor::cli::commands::search::{execute, SearchArgs};
use advisor::cli::OutputFormat;

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::DocumentSet;

fn args(query: &str, docs: &DocumentSet, limit: Option<usize>) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        dir: docs.path().to_path_buf(),
        limit,
    }
}

#[test]
fn test_search_valid_query_human() {
    let (services, _client, _temp) = create_cli_test_services();
    let docs = DocumentSet::handbook();

    let result = execute(args("tracks", &docs, None), &services, OutputFormat::Human);
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
    assert_eq!(services.list_documents().unwrap().len(), 3);
}

#[test]
fn test_search_valid_query_json() {
    let (services, _client, _temp) = create_cli_test_services();
    let docs = DocumentSet::handbook();

    let result = execute(args("deadline", &docs, Some(2)), &services, OutputFormat::Json);
    assert!(result.is_ok());
}

#[test]
fn test_search_no_results() {
    let (services, _client, _temp) = create_cli_test_services();
    let docs = DocumentSet::handbook();

    let result = execute(args("zzzznotfound", &docs, None), &services, OutputFormat::Human);
    assert!(result.is_ok());
}

#[test]
fn test_search_zero_limit_is_rejected() {
    let (services, _client, _temp) = create_cli_test_services();
    let docs = DocumentSet::handbook();

    let result = execute(args("tracks", &docs, Some(0)), &services, OutputFormat::Human);
    assert!(result.is_err());
}

#[test]
fn test_search_empty_query_is_rejected() {
    let (services, _client, _temp) = create_cli_test_services();
    let docs = DocumentSet::handbook();

    let result = execute(args("   ", &docs, None), &services, OutputFormat::Human);
    assert!(result.is_err());
}

#[test]
fn test_search_missing_directory() {
    let (services, _client, _temp) = create_cli_test_services();
    let args = SearchArgs {
        query: "tracks".to_string(),
        dir: "/nonexistent/advising".into(),
        limit: None,
    };

    assert!(execute(args, &services, OutputFormat::Human).is_err());
}
