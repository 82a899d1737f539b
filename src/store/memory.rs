//! In-memory chat store implementation.
//!
//! Useful for testing and for running without a database file.

use super::{ChatRecord, ChatStore};
use crate::error::{Result, WebnavError};
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory chat store, records kept in insertion order.
pub struct MemoryChatStore {
    records: RwLock<Vec<ChatRecord>>,
}

impl MemoryChatStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> WebnavError {
    WebnavError::Store(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn insert(&self, record: &ChatRecord) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(WebnavError::Store(format!(
                "Chat {} already exists",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ChatRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        // Reverse first so equal timestamps keep the later insert on top.
        let mut result: Vec<ChatRecord> = records.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(result)
    }

    async fn get(&self, id: &str) -> Result<Option<ChatRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.len())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
