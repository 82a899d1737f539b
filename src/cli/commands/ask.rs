//! Ask command implementation.

use crate::cli::{content_preview, Output};
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::store::ResultKind;
use anyhow::Result;

/// Run one task from the terminal and print the answer.
pub async fn run_ask(question: &str, thinking: bool, no_save: bool, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::from_settings(&settings)?;

    let spinner = Output::spinner("Agent working...");
    let outcome = orchestrator.execute_task(question, !no_save).await;
    spinner.finish_and_clear();

    let Some(summary) = outcome.summary else {
        let message = outcome
            .record
            .result_text(ResultKind::Error)
            .unwrap_or("Agent failed")
            .to_string();
        Output::error(&message);
        anyhow::bail!("{}", message);
    };

    if thinking && !summary.thinking.is_empty() {
        Output::header("Reasoning");
        Output::dim_block(&summary.thinking);
    }

    Output::header("Answer");
    println!("\n{}\n", summary.direct_answer);

    if summary.full_response.trim() != summary.direct_answer {
        Output::header("Details");
        println!("\n{}\n", summary.full_response);
    }

    if !outcome.tool_calls.is_empty() {
        Output::header(&format!("Tool calls ({})", outcome.tool_calls.len()));
        for call in &outcome.tool_calls {
            Output::list_item(&content_preview(&call.to_string(), 80));
        }
        println!();
    }

    if outcome.persisted {
        Output::info(&format!("Saved as {}", outcome.record.id));
    }

    Ok(())
}
