//! Chat record persistence.
//!
//! Provides a trait-based interface over the chat store backends. Every
//! operation returns a `Result`; callers decide whether a failure matters.

mod memory;
mod sqlite;

pub use memory::MemoryChatStore;
pub use sqlite::SqliteChatStore;

use crate::config::{Settings, StoreProvider};
use crate::error::Result;
use crate::summarizer::Summary;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Kind of a result entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// First paragraph of the answer.
    DirectAnswer,
    /// Full answer without the reasoning block.
    FullResponse,
    /// The request failed; the text describes why.
    Error,
}

/// One entry in a chat record's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    pub id: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
}

/// A query and the results generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Unique record ID (UUID v4 for generated records).
    pub id: String,
    /// The user's message.
    pub query: String,
    /// Results in display order.
    pub results: Vec<ChatResult>,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    /// Generate a new record ID.
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Record for a successful task: direct answer then full response.
    pub fn answered(id: String, query: &str, summary: &Summary) -> Self {
        Self {
            id,
            query: query.to_string(),
            results: vec![
                ChatResult {
                    id: 1,
                    text: summary.direct_answer.clone(),
                    kind: ResultKind::DirectAnswer,
                },
                ChatResult {
                    id: 2,
                    text: summary.full_response.clone(),
                    kind: ResultKind::FullResponse,
                },
            ],
            timestamp: now(),
        }
    }

    /// Record for a failed task with a single error entry.
    pub fn failed(id: String, query: &str, error: &str) -> Self {
        Self {
            id,
            query: query.to_string(),
            results: vec![ChatResult {
                id: 1,
                text: format!("An error occurred: Error processing request: {}", error),
                kind: ResultKind::Error,
            }],
            timestamp: now(),
        }
    }

    /// Empty record returned when a lookup finds nothing.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            query: String::new(),
            results: Vec::new(),
            timestamp: now(),
        }
    }

    /// Text of the first result of the given kind.
    pub fn result_text(&self, kind: ResultKind) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.text.as_str())
    }
}

/// Current time at the precision the stores keep.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Trait for chat store implementations.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Insert a new record. Records are never replaced.
    async fn insert(&self, record: &ChatRecord) -> Result<()>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<ChatRecord>>;

    /// Look up a record by ID.
    async fn get(&self, id: &str) -> Result<Option<ChatRecord>>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize>;

    /// Backend name for logs and diagnostics.
    fn name(&self) -> &str;
}

/// Open the store selected in settings. `Ok(None)` means persistence is off.
pub fn open_store(settings: &Settings) -> Result<Option<Arc<dyn ChatStore>>> {
    match settings.store.provider {
        StoreProvider::None => {
            info!("Chat persistence disabled");
            Ok(None)
        }
        StoreProvider::Memory => Ok(Some(Arc::new(MemoryChatStore::new()))),
        StoreProvider::Sqlite => {
            let store = SqliteChatStore::new(&settings.sqlite_path())?;
            Ok(Some(Arc::new(store)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary {
            direct_answer: "Short".to_string(),
            full_response: "Short\n\nLong".to_string(),
            thinking: String::new(),
        }
    }

    #[test]
    fn test_answered_record_shape() {
        let record = ChatRecord::answered(ChatRecord::new_id(), "q", &summary());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["query"], "q");
        assert_eq!(json["results"][0]["id"], 1);
        assert_eq!(json["results"][0]["type"], "direct_answer");
        assert_eq!(json["results"][1]["type"], "full_response");
        assert_eq!(json["results"][1]["text"], "Short\n\nLong");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_failed_record_has_single_error_entry() {
        let record = ChatRecord::failed("abc".to_string(), "q", "model offline");
        assert_eq!(record.results.len(), 1);
        assert_eq!(record.results[0].kind, ResultKind::Error);
        assert_eq!(
            record.result_text(ResultKind::Error),
            Some("An error occurred: Error processing request: model offline")
        );
    }

    #[test]
    fn test_placeholder_keeps_requested_id() {
        let record = ChatRecord::placeholder("missing-id");
        assert_eq!(record.id, "missing-id");
        assert!(record.query.is_empty());
        assert!(record.results.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ChatRecord::new_id(), ChatRecord::new_id());
    }

    #[test]
    fn test_open_store_none() {
        let mut settings = Settings::default();
        settings.store.provider = StoreProvider::None;
        assert!(open_store(&settings).unwrap().is_none());
    }

    #[test]
    fn test_open_store_sqlite_at_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.store.sqlite_path = dir.path().join("chats.db").to_string_lossy().to_string();

        let store = open_store(&settings).unwrap().unwrap();
        assert_eq!(store.name(), "sqlite");
        assert!(dir.path().join("chats.db").exists());
    }
}
