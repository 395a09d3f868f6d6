//! Split command - show how a document is chunked

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::indexer::{Chunker, DocumentLoader};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Document to split (.txt or .md)
    pub file: PathBuf,

    /// Characters per chunk (defaults to indexing.chunk_size)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared by consecutive chunks (defaults to indexing.chunk_overlap)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Print full chunk text instead of a preview
    #[arg(long)]
    pub full: bool,
}

/// One chunk as reported by the command
#[derive(Debug, Serialize)]
pub struct ChunkItem {
    pub index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub chars: usize,
    pub text: String,
}

/// Split command output
#[derive(Debug, Serialize)]
pub struct SplitOutput {
    pub file: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub total_chars: usize,
    pub chunks: Vec<ChunkItem>,
}

/// Execute the split command
pub fn execute(
    args: SplitArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunk_size = args.chunk_size.unwrap_or(config.indexing.chunk_size);
    let chunk_overlap = args.chunk_overlap.unwrap_or(config.indexing.chunk_overlap);
    let chunker = Chunker::new(chunk_size, chunk_overlap)?;

    let loader = DocumentLoader::new(
        &config.indexing.allowed_extensions,
        config.indexing.max_document_size_mb,
    );
    let text = loader.load_path(&args.file)?;

    let chunks = chunker
        .chunk_text(&text)
        .into_iter()
        .map(|chunk| ChunkItem {
            index: chunk.chunk_index,
            start_offset: chunk.start_offset,
            end_offset: chunk.end_offset,
            chars: chunk.text.chars().count(),
            text: chunk.text,
        })
        .collect();

    let result = SplitOutput {
        file: args.file.display().to_string(),
        chunk_size,
        chunk_overlap,
        total_chars: text.chars().count(),
        chunks,
    };

    output::render(&result, format, |result| {
        println!(
            "{}: {} chars -> {} chunk(s) (size {}, overlap {})\n",
            colors::file_name(&result.file),
            colors::number(&result.total_chars.to_string()),
            colors::number(&result.chunks.len().to_string()),
            result.chunk_size,
            result.chunk_overlap
        );

        for chunk in &result.chunks {
            println!(
                "[{}] {}",
                colors::rank(&chunk.index.to_string()),
                colors::dim(&format!(
                    "bytes {}..{}, {} chars",
                    chunk.start_offset, chunk.end_offset, chunk.chars
                ))
            );
            let text = if args.full {
                chunk.text.clone()
            } else {
                output::truncate_chars(&chunk.text, 100)
            };
            println!("    {text}\n");
        }
    })?;

    Ok(())
}
