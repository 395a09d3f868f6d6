//! SQLite-backed metadata store.
//!
//! Holds the document records whose ids key the in-memory chunk
//! index, plus the chat log that doubles as session history.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::core::error::{AdvisorError, Result};
use crate::core::types::{ChatMessage, ChatRole, DocumentId, DocumentInfo};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS document_store (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    upload_timestamp TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS application_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    user_query TEXT NOT NULL,
    gpt_response TEXT NOT NULL,
    model TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_application_logs_session
    ON application_logs (session_id);
";

/// Document records and chat logs in one SQLite database
pub struct MetadataStore {
    conn: Mutex<Connection>,
}

impl MetadataStore {
    /// Open (or create) the database at `path`.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::debug!("Opened metadata store at {:?}", path);
        Self::with_connection(conn)
    }

    /// Private in-memory database, used by tests and the CLI.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| AdvisorError::StorageError(format!("Metadata store lock poisoned: {e}")))
    }

    /// Record an uploaded document and return its new id.
    pub fn insert_document(&self, filename: &str) -> Result<DocumentId> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO document_store (filename, upload_timestamp) VALUES (?1, ?2)",
            params![filename, now_timestamp()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Delete a document record. Returns whether a row was removed.
    pub fn delete_document(&self, id: DocumentId) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM document_store WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    pub fn get_document(&self, id: DocumentId) -> Result<Option<DocumentInfo>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, filename, upload_timestamp FROM document_store WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, DocumentId>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, filename, ts)| {
            Ok(DocumentInfo {
                id,
                filename,
                upload_timestamp: parse_timestamp(&ts)?,
            })
        })
        .transpose()
    }

    /// All document records, newest first.
    pub fn list_documents(&self) -> Result<Vec<DocumentInfo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, filename, upload_timestamp FROM document_store
             ORDER BY upload_timestamp DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, DocumentId>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, filename, ts)| {
                Ok(DocumentInfo {
                    id,
                    filename,
                    upload_timestamp: parse_timestamp(&ts)?,
                })
            })
            .collect()
    }

    pub fn document_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM document_store", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Drop every document record. Returns how many were removed.
    pub fn clear_documents(&self) -> Result<usize> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM document_store", [])?)
    }

    /// Append one question/answer exchange to the chat log.
    pub fn insert_log(
        &self,
        session_id: &str,
        user_query: &str,
        response: &str,
        model: &str,
    ) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO application_logs (session_id, user_query, gpt_response, model, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![session_id, user_query, response, model, now_timestamp()],
        )?;
        Ok(())
    }

    /// Chat history of a session as alternating human/ai messages,
    /// oldest first.
    pub fn chat_history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_query, gpt_response FROM application_logs
             WHERE session_id = ?1 ORDER BY id ASC",
        )?;
        let exchanges = stmt
            .query_map(params![session_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut messages = Vec::with_capacity(exchanges.len() * 2);
        for (query, response) in exchanges {
            messages.push(ChatMessage {
                role: ChatRole::Human,
                content: query,
            });
            messages.push(ChatMessage {
                role: ChatRole::Ai,
                content: response,
            });
        }
        Ok(messages)
    }
}

/// Fixed-width UTC timestamps so lexical order matches time order
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AdvisorError::StorageError(format!("Bad timestamp '{value}': {e}")))
}
