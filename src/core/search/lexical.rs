//! In-memory keyword index over document chunks.
//!
//! Scoring is a plain occurrence count: for every distinct query
//! token, the number of non-overlapping case-insensitive occurrences
//! of that token inside the chunk. There is no IDF, no length
//! normalisation, and no stemming.

use std::collections::{BTreeMap, HashSet};

use crate::core::error::{AdvisorError, Result};
use crate::core::types::{DocumentId, LexicalHit};

/// Number of chunks returned when the caller does not ask for more
pub const DEFAULT_K: usize = 5;

/// Chunk store keyed by document id.
///
/// A `BTreeMap` keeps scan order deterministic (ascending id, then
/// chunk position), which is what ties fall back to when ranking.
#[derive(Debug, Default, Clone)]
pub struct LexicalIndex {
    documents: BTreeMap<DocumentId, Vec<String>>,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `chunks` under `document_id`, replacing any prior entry.
    ///
    /// Blank chunks are dropped. If nothing is left the call fails
    /// with `EmptyDocument` and the index is not modified.
    pub fn index(&mut self, document_id: DocumentId, chunks: Vec<String>) -> Result<()> {
        let chunks: Vec<String> = chunks
            .into_iter()
            .filter(|chunk| !chunk.trim().is_empty())
            .collect();

        if chunks.is_empty() {
            return Err(AdvisorError::EmptyDocument(document_id));
        }

        tracing::debug!("Indexed document {} ({} chunks)", document_id, chunks.len());
        self.documents.insert(document_id, chunks);
        Ok(())
    }

    /// Top `k` chunk texts for `query`, best first.
    pub fn search(&self, query: &str, k: usize) -> Vec<String> {
        self.search_scored(query, k)
            .into_iter()
            .map(|hit| hit.text)
            .collect()
    }

    /// Top `k` hits for `query` with scores and provenance.
    ///
    /// Chunks scoring zero are never returned. An empty index, a
    /// query without tokens, or `k == 0` all yield an empty list.
    pub fn search_scored(&self, query: &str, k: usize) -> Vec<LexicalHit> {
        if k == 0 {
            return Vec::new();
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<LexicalHit> = Vec::new();
        for (&document_id, chunks) in &self.documents {
            for (chunk_index, chunk) in chunks.iter().enumerate() {
                let score = score_chunk(chunk, &tokens);
                if score > 0 {
                    hits.push(LexicalHit {
                        score,
                        document_id,
                        chunk_index,
                        text: chunk.clone(),
                    });
                }
            }
        }

        // sort_by is stable: equal scores stay in scan order
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(k);
        hits
    }

    /// Remove a document's chunks. Returns whether an entry existed.
    pub fn delete(&mut self, document_id: DocumentId) -> bool {
        self.documents.remove(&document_id).is_some()
    }

    /// Remove every document.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn contains(&self, document_id: DocumentId) -> bool {
        self.documents.contains_key(&document_id)
    }

    /// Chunks stored for a document, in order
    pub fn chunks(&self, document_id: DocumentId) -> Option<&[String]> {
        self.documents.get(&document_id).map(Vec::as_slice)
    }

    /// Ids of indexed documents, ascending
    pub fn document_ids(&self) -> Vec<DocumentId> {
        self.documents.keys().copied().collect()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Lower-cased, whitespace-separated, de-duplicated query tokens in
/// first-seen order.
pub fn tokenize(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut seen = HashSet::new();
    lowered
        .split_whitespace()
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

fn score_chunk(chunk: &str, tokens: &[String]) -> usize {
    let haystack = chunk.to_lowercase();
    tokens
        .iter()
        .map(|token| haystack.matches(token.as_str()).count())
        .sum()
}
