//! History and show commands.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{open_store, ChatStore, ResultKind};
use anyhow::{Context, Result};
use std::sync::Arc;

fn require_store(settings: &Settings) -> Result<Arc<dyn ChatStore>> {
    open_store(settings)?.context("Chat persistence is disabled (store.provider = \"none\")")
}

/// List stored chats, newest first.
pub async fn run_history(limit: usize, settings: Settings) -> Result<()> {
    let store = require_store(&settings)?;
    let chats = store.list().await?;

    if chats.is_empty() {
        Output::info("No chats yet. Use 'webnav ask <question>' or the HTTP API to add some.");
        return Ok(());
    }

    Output::header(&format!("Chats ({})", chats.len()));
    println!();
    for chat in chats.iter().take(limit) {
        Output::chat_summary(&chat.id, &chat.query, &chat.timestamp);
    }

    if chats.len() > limit {
        println!();
        Output::info(&format!("{} older chat(s) not shown", chats.len() - limit));
    }

    Ok(())
}

/// Print one stored chat.
pub async fn run_show(id: &str, settings: Settings) -> Result<()> {
    let store = require_store(&settings)?;

    let Some(chat) = store.get(id).await? else {
        Output::error(&format!("Chat not found: {}", id));
        anyhow::bail!("Chat not found: {}", id);
    };

    Output::header(&chat.query);
    Output::kv("ID", &chat.id);
    Output::kv("Created", &chat.timestamp.to_rfc3339());

    if let Some(error) = chat.result_text(ResultKind::Error) {
        println!();
        Output::error(error);
        return Ok(());
    }

    if let Some(direct) = chat.result_text(ResultKind::DirectAnswer) {
        Output::header("Answer");
        println!("\n{}\n", direct);
    }
    if let Some(full) = chat.result_text(ResultKind::FullResponse) {
        Output::header("Full response");
        println!("\n{}\n", full);
    }

    Ok(())
}
