//! Unified service container for the advisor
//!
//! Provides shared access to all core services. Every adapter (HTTP,
//! CLI) goes through the operations defined here.

use crate::core::config::Config;
use crate::core::error::{AdvisorError, Result};
use crate::core::indexer::{IngestPipeline, PreparedDocument};
use crate::core::llm::{GeminiClient, GenerationClient, PromptBuilder};
use crate::core::search::LexicalIndex;
use crate::core::storage::MetadataStore;
use crate::core::types::{
    DebugSearchResponse, DocumentId, DocumentInfo, IngestReport, IngestStats, LexicalHit,
    ModelName, QueryResponse, ResultPreview,
};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Query used by the debug search endpoint when none is given
pub const DEFAULT_DEBUG_QUERY: &str = "MS IT tracks";

/// Characters shown per debug search preview
pub const PREVIEW_CHARS: usize = 200;

/// Answer returned when generation fails
pub const APOLOGY: &str = "I apologize, but I'm experiencing technical difficulties. \
Please try again later or contact the academic advising office directly.";

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Loader + chunker built from `[indexing]`
    pub pipeline: Arc<IngestPipeline>,

    /// In-memory chunk index; one lock serialises writers against readers
    pub index: Arc<RwLock<LexicalIndex>>,

    /// Document records and chat logs
    pub records: Arc<MetadataStore>,

    /// Answer generation backend
    pub llm: Arc<dyn GenerationClient>,

    prompt: Arc<PromptBuilder>,
}

impl Services {
    /// Create services from configuration.
    ///
    /// Opens the metadata database under `storage.data_dir` and
    /// connects the Gemini client.
    pub fn new(config: Config) -> Result<Self> {
        let records = MetadataStore::open(&config.storage.database_path())?;
        let llm = GeminiClient::new(&config.llm)?;
        Self::with_components(config, records, Arc::new(llm))
    }

    /// Create services from explicit collaborators.
    pub fn with_components(
        config: Config,
        records: MetadataStore,
        llm: Arc<dyn GenerationClient>,
    ) -> Result<Self> {
        let pipeline = IngestPipeline::new(&config.indexing)?;
        let prompt = PromptBuilder::new(config.llm.system_prompt.clone());

        Ok(Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            index: Arc::new(RwLock::new(LexicalIndex::new())),
            records: Arc::new(records),
            llm,
            prompt: Arc::new(prompt),
        })
    }

    fn read_index(&self) -> Result<RwLockReadGuard<'_, LexicalIndex>> {
        self.index
            .read()
            .map_err(|e| AdvisorError::StorageError(format!("Index lock poisoned: {e}")))
    }

    fn write_index(&self) -> Result<RwLockWriteGuard<'_, LexicalIndex>> {
        self.index
            .write()
            .map_err(|e| AdvisorError::StorageError(format!("Index lock poisoned: {e}")))
    }

    /// Upload one document: split it, record it, then index it.
    ///
    /// If indexing fails the new record is deleted again, so a record
    /// exists exactly when its chunks are searchable.
    pub fn ingest_document(&self, filename: &str, bytes: &[u8]) -> Result<IngestReport> {
        let prepared = self.pipeline.prepare(filename, bytes)?;
        self.store_prepared(prepared)
    }

    /// Ingest every matching file under `root`.
    ///
    /// Files that fail to load or index are skipped and counted.
    pub fn ingest_directory(&self, root: &Path) -> Result<IngestStats> {
        let start = Instant::now();
        let mut stats = IngestStats::default();

        for path in self.pipeline.discover(root)? {
            let outcome = self
                .pipeline
                .prepare_path(&path)
                .and_then(|prepared| self.store_prepared(prepared));

            match outcome {
                Ok(report) => {
                    stats.documents_indexed += 1;
                    stats.chunks_created += report.chunks;
                }
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    stats.documents_skipped += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Ingested {} documents ({} chunks, {} skipped) in {}ms",
            stats.documents_indexed,
            stats.chunks_created,
            stats.documents_skipped,
            stats.duration_ms
        );
        Ok(stats)
    }

    fn store_prepared(&self, prepared: PreparedDocument) -> Result<IngestReport> {
        let PreparedDocument { filename, chunks } = prepared;

        // Held across the record insert and indexing; reset and delete
        // take the same guard, so neither sees one without the other.
        let mut index = self.write_index()?;
        let file_id = self.records.insert_document(&filename)?;

        if let Err(e) = index.index(file_id, chunks) {
            if let Err(cleanup) = self.records.delete_document(file_id) {
                tracing::error!("Failed to remove record {} after failed indexing: {}", file_id, cleanup);
            }
            return Err(e);
        }
        let chunks = index.chunks(file_id).map_or(0, <[String]>::len);
        drop(index);

        tracing::info!("Indexed {} as document {} ({} chunks)", filename, file_id, chunks);
        Ok(IngestReport {
            file_id,
            filename,
            chunks,
        })
    }

    /// Remove a document from the index and the metadata store.
    ///
    /// The index side is idempotent; a missing record is reported as
    /// `DocumentNotFound`.
    pub fn remove_document(&self, id: DocumentId) -> Result<()> {
        let (had_chunks, had_record) = {
            let mut index = self.write_index()?;
            let had_chunks = index.delete(id);
            (had_chunks, self.records.delete_document(id)?)
        };
        if !had_record {
            return Err(AdvisorError::DocumentNotFound(id));
        }

        tracing::info!("Deleted document {} (chunks present: {})", id, had_chunks);
        Ok(())
    }

    /// Clear the index and every document record.
    pub fn reset(&self) -> Result<usize> {
        let removed = {
            let mut index = self.write_index()?;
            index.clear();
            self.records.clear_documents()?
        };
        tracing::info!("Reset index, removed {} document records", removed);
        Ok(removed)
    }

    /// Document records, newest first
    pub fn list_documents(&self) -> Result<Vec<DocumentInfo>> {
        self.records.list_documents()
    }

    /// Drop document records whose chunks are not in the index.
    ///
    /// Run at start-up: chunks do not survive a restart, records do.
    pub fn purge_stale_records(&self) -> Result<usize> {
        let index = self.read_index()?;
        let documents = self.records.list_documents()?;

        let mut purged = 0;
        for doc in documents.iter().filter(|doc| !index.contains(doc.id)) {
            if self.records.delete_document(doc.id)? {
                purged += 1;
            }
        }

        if purged > 0 {
            tracing::info!("Purged {} stale document records", purged);
        }
        Ok(purged)
    }

    /// Validate a query string against `[search]` limits.
    pub fn validate_query(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(AdvisorError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let length = query.chars().count();
        if length > self.config.search.max_query_length {
            return Err(AdvisorError::InvalidQuery(format!(
                "Query is {length} characters, limit is {}",
                self.config.search.max_query_length
            )));
        }

        Ok(())
    }

    /// Scored keyword search. `k` defaults to `search.default_k`.
    pub fn search(&self, query: &str, k: Option<usize>) -> Result<Vec<LexicalHit>> {
        self.validate_query(query)?;

        let k = k.unwrap_or(self.config.search.default_k);
        if k == 0 || k > self.config.search.max_k {
            return Err(AdvisorError::InvalidQuery(format!(
                "k must be between 1 and {}",
                self.config.search.max_k
            )));
        }

        Ok(self.read_index()?.search_scored(query, k))
    }

    /// Search with index totals and shortened previews.
    pub fn debug_search(&self, query: Option<&str>, k: Option<usize>) -> Result<DebugSearchResponse> {
        let query = query.unwrap_or(DEFAULT_DEBUG_QUERY);
        let hits = self.search(query, k)?;

        let (total_documents, total_chunks) = {
            let index = self.read_index()?;
            (index.document_count(), index.chunk_count())
        };

        let results: Vec<ResultPreview> = hits
            .into_iter()
            .map(|hit| ResultPreview {
                document_id: hit.document_id,
                score: hit.score,
                content_preview: preview(&hit.text),
            })
            .collect();

        Ok(DebugSearchResponse {
            total_documents,
            total_chunks,
            search_query: query.to_string(),
            results_count: results.len(),
            results,
        })
    }

    /// Answer a student question using retrieved context and the
    /// session's chat history.
    ///
    /// A generation failure is logged and replaced by an apology; the
    /// exchange is recorded either way.
    pub async fn answer(
        &self,
        question: &str,
        session_id: Option<String>,
        model: ModelName,
    ) -> Result<QueryResponse> {
        self.validate_query(question)?;

        let session_id = session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        tracing::info!("Session ID: {}, User Query: {}", session_id, question);

        let history = self.records.chat_history(&session_id)?;
        let context = self
            .read_index()?
            .search(question, self.config.search.default_k);
        tracing::debug!("Retrieved {} chunks for session {}", context.len(), session_id);

        let prompt = self.prompt.build(question, &context, &history);
        let answer = match self.llm.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Generation via {} failed: {}", self.llm.name(), e);
                APOLOGY.to_string()
            }
        };

        self.records
            .insert_log(&session_id, question, &answer, model.as_str())?;
        tracing::info!("Session ID: {}, AI Response generated", session_id);

        Ok(QueryResponse {
            answer,
            session_id,
            model,
        })
    }
}

fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
