//! Search command - keyword search over a directory of documents

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::DocumentId;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keywords to look for
    pub query: String,

    /// Directory of documents to index before searching
    #[arg(long, short = 'd')]
    pub dir: PathBuf,

    /// Maximum number of results (defaults to search.default_k)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub file: String,
    pub score: usize,
    pub chunk_index: usize,
    pub text: String,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub documents_indexed: usize,
    pub index_duration_ms: u64,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services.ingest_directory(&args.dir)?;
    if stats.documents_skipped > 0 {
        output::print_warning(&format!("{} file(s) skipped", stats.documents_skipped));
    }

    let hits = services.search(&args.query, args.limit)?;

    // Map document ids back to file names for display
    let documents = services.list_documents()?;
    let file_name = |id: DocumentId| {
        documents
            .iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.filename.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let results: Vec<SearchResultItem> = hits
        .into_iter()
        .enumerate()
        .map(|(i, hit)| SearchResultItem {
            rank: i + 1,
            file: file_name(hit.document_id),
            score: hit.score,
            chunk_index: hit.chunk_index,
            text: hit.text,
        })
        .collect();

    let result = SearchOutput {
        query: args.query,
        documents_indexed: stats.documents_indexed,
        index_duration_ms: stats.duration_ms,
        total_results: results.len(),
        results,
    };

    output::render(&result, format, |result| {
        if result.results.is_empty() {
            println!(
                "No results found for '{}' in {} document(s)",
                colors::label(&result.query),
                colors::number(&result.documents_indexed.to_string())
            );
            return;
        }

        println!(
            "Found {} result(s) in {} document(s) {}:\n",
            colors::number(&result.total_results.to_string()),
            colors::number(&result.documents_indexed.to_string()),
            colors::dim(&format!(
                "(indexed in {})",
                output::format_duration_ms(result.index_duration_ms)
            ))
        );

        for item in &result.results {
            println!(
                "[{}] {} {}",
                colors::rank(&item.rank.to_string()),
                colors::file_name(&item.file),
                colors::score(&format!("(score: {}, chunk {})", item.score, item.chunk_index))
            );
            println!("    {}\n", colors::dim(&output::truncate_chars(&item.text, 200)));
        }
    })?;

    Ok(())
}
