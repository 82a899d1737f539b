//! Task orchestrator for webnav.
//!
//! Coordinates one request from the user's message to a stored chat record:
//! agent run, summarization, record creation and persistence.

use crate::agent::{Agent, AgentRunner, ToolCallRecord};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::store::{open_store, ChatRecord, ChatStore};
use crate::summarizer::{summarize, Summary};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Everything produced for one task.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// The record returned to the client.
    pub record: ChatRecord,
    /// Summarized answer, absent when the agent failed.
    pub summary: Option<Summary>,
    /// Tool calls the agent made on the way.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Whether the record reached the store.
    pub persisted: bool,
}

/// The main orchestrator, shared by the HTTP server and the CLI.
pub struct Orchestrator {
    agent: Arc<dyn AgentRunner>,
    store: Option<Arc<dyn ChatStore>>,
}

impl Orchestrator {
    /// Create an orchestrator from explicit parts.
    pub fn new(agent: Arc<dyn AgentRunner>, store: Option<Arc<dyn ChatStore>>) -> Self {
        Self { agent, store }
    }

    /// Build the agent and open the chat store described by settings.
    ///
    /// A store that fails to open is logged and the orchestrator runs
    /// without persistence.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let agent = Agent::from_settings(settings, &prompts)?;
        info!(
            "Agent using model {} at {}",
            agent.model(),
            settings.llm.base_url
        );

        let store = match open_store(settings) {
            Ok(store) => store,
            Err(e) => {
                warn!("Chat store unavailable, continuing without persistence: {}", e);
                None
            }
        };

        Ok(Self::new(Arc::new(agent), store))
    }

    /// The chat store, if one is attached.
    pub fn store(&self) -> Option<Arc<dyn ChatStore>> {
        self.store.clone()
    }

    /// Run one task. Never fails: agent errors become an error record.
    #[instrument(skip(self, message))]
    pub async fn execute_task(&self, message: &str, persist: bool) -> TaskOutcome {
        let chat_id = ChatRecord::new_id();
        info!("Executing task {}", chat_id);

        let response = match self.agent.run(message).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error processing request {}: {}", chat_id, e);
                return TaskOutcome {
                    record: ChatRecord::failed(chat_id, message, &e.to_string()),
                    summary: None,
                    tool_calls: Vec::new(),
                    persisted: false,
                };
            }
        };

        let summary = summarize(&response.content);
        let record = ChatRecord::answered(chat_id, message, &summary);

        let persisted = if persist {
            match self.save(&record).await {
                Ok(saved) => saved,
                Err(e) => {
                    warn!("Failed to save chat {}: {}", record.id, e);
                    false
                }
            }
        } else {
            false
        };

        TaskOutcome {
            record,
            summary: Some(summary),
            tool_calls: response.tool_calls,
            persisted,
        }
    }

    /// Store a record. `Ok(false)` when no store is attached.
    pub async fn save(&self, record: &ChatRecord) -> Result<bool> {
        match &self.store {
            Some(store) => {
                store.insert(record).await?;
                info!("Chat saved to {} store with ID: {}", store.name(), record.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
