//! SQLite-based chat store implementation.
//!
//! Each chat record is one row; the ordered results list is kept as a JSON
//! document so the record shape round-trips unchanged.

use super::{ChatRecord, ChatResult, ChatStore};
use crate::error::{Result, WebnavError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS chats (
        id TEXT PRIMARY KEY,
        query TEXT NOT NULL,
        results_json TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_chats_timestamp ON chats(timestamp);
"#;

/// SQLite-based chat store.
pub struct SqliteChatStore {
    conn: Mutex<Connection>,
}

impl SqliteChatStore {
    /// Open (or create) a chat store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite chat store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite chat store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| WebnavError::Store(format!("Failed to acquire lock: {}", e)))
    }

    /// Fixed-width timestamps so text ordering matches time ordering.
    fn format_timestamp(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ChatRecord> {
        let results_json: String = row.get(2)?;
        let timestamp_str: String = row.get(3)?;

        let results: Vec<ChatResult> = serde_json::from_str(&results_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(ChatRecord {
            id: row.get(0)?,
            query: row.get(1)?,
            results,
            timestamp,
        })
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn insert(&self, record: &ChatRecord) -> Result<()> {
        let results_json = serde_json::to_string(&record.results)?;
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO chats (id, query, results_json, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id,
                record.query,
                results_json,
                Self::format_timestamp(&record.timestamp),
            ],
        )?;

        debug!("Inserted chat {}", record.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ChatRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, query, results_json, timestamp FROM chats ORDER BY timestamp DESC, rowid DESC",
        )?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!("Listed {} chats", records.len());
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Option<ChatRecord>> {
        let conn = self.lock()?;

        let record = conn.query_row(
            "SELECT id, query, results_json, timestamp FROM chats WHERE id = ?1",
            params![id],
            Self::row_to_record,
        );

        match record {
            Ok(r) => Ok(Some(r)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM chats", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
