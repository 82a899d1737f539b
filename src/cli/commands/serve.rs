//! HTTP API server command.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::server::{router, AppState};
use std::sync::Arc;
use tracing::info;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_settings(&settings)?;
    let store_name = orchestrator
        .store()
        .map(|s| s.name().to_string())
        .unwrap_or_else(|| "none".to_string());

    let state = Arc::new(AppState::new(orchestrator, settings.llm.is_configured()));
    let app = router(state);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("webnav API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", &settings.llm.model);
    Output::kv("LLM endpoint", &settings.llm.base_url);
    Output::kv("Chat store", &store_name);
    println!();
    println!("Endpoints:");
    Output::kv("Execute task", "POST /api/executeTask");
    Output::kv("List chats", "GET  /api/chats");
    Output::kv("Get chat", "GET  /api/chats/{id}");
    Output::kv("Health", "GET  /api/health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
