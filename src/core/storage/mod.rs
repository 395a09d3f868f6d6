//! Durable metadata storage.
//!
//! Chunks are kept in memory by the search index; this layer only
//! persists what must survive a restart: document records and the
//! chat log.
//!
//! # Database Layout
//!
//! ```text
//! {data_dir}/advisor.db
//! ├── document_store       # id, filename, upload_timestamp
//! └── application_logs     # session_id, user_query, gpt_response, model, created_at
//! ```

mod records;

pub use records::MetadataStore;
