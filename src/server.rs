//! HTTP API for webnav.
//!
//! Every endpoint answers 200. Failures are reported inside the payload:
//! an `error` result entry for tasks, an `error` field for lookups.

use crate::orchestrator::Orchestrator;
use crate::store::{ChatRecord, ChatResult};
use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Shared application state, built once at startup.
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub llm_configured: bool,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, llm_configured: bool) -> Self {
        Self {
            orchestrator,
            llm_configured,
        }
    }
}

/// Build the API router with permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/executeTask", post(execute_task))
        .route("/api/chats", get(list_chats))
        .route("/api/chats/{id}", get(get_chat))
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ExecuteTaskRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ExecuteTaskResponse {
    /// Nothing to do: missing message or unreadable body.
    Empty { results: Vec<ChatResult> },
    Record(ChatRecord),
}

#[derive(Serialize)]
struct ChatListResponse {
    chats: Vec<ChatRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ChatLookupResponse {
    #[serde(flatten)]
    record: ChatRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Key name kept for existing clients; true when a chat store is attached.
    #[serde(rename = "mongodb_connected")]
    store_connected: bool,
    llm_configured: bool,
}

// === Handlers ===

async fn execute_task(State(state): State<Arc<AppState>>, body: Bytes) -> Json<ExecuteTaskResponse> {
    info!("Received request to /api/executeTask");

    let message = match serde_json::from_slice::<ExecuteTaskRequest>(&body) {
        Ok(req) => req.message.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to parse request body: {}", e);
            String::new()
        }
    };

    if message.trim().is_empty() {
        info!("No message provided");
        return Json(ExecuteTaskResponse::Empty {
            results: Vec::new(),
        });
    }

    let outcome = state.orchestrator.execute_task(&message, true).await;
    Json(ExecuteTaskResponse::Record(outcome.record))
}

async fn list_chats(State(state): State<Arc<AppState>>) -> Json<ChatListResponse> {
    let Some(store) = state.orchestrator.store() else {
        info!("Chat store not available, returning empty chats list");
        return Json(ChatListResponse {
            chats: Vec::new(),
            error: None,
        });
    };

    match store.list().await {
        Ok(chats) => Json(ChatListResponse { chats, error: None }),
        Err(e) => {
            warn!("Failed to retrieve chats: {}", e);
            Json(ChatListResponse {
                chats: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ChatLookupResponse> {
    let Some(store) = state.orchestrator.store() else {
        info!("Chat store not available, returning empty chat");
        return Json(ChatLookupResponse {
            record: ChatRecord::placeholder(&id),
            error: None,
        });
    };

    match store.get(&id).await {
        Ok(Some(record)) => Json(ChatLookupResponse {
            record,
            error: None,
        }),
        Ok(None) => {
            info!("Chat with ID {} not found", id);
            Json(ChatLookupResponse {
                record: ChatRecord::placeholder(&id),
                error: None,
            })
        }
        Err(e) => {
            warn!("Failed to retrieve chat {}: {}", id, e);
            Json(ChatLookupResponse {
                record: ChatRecord::placeholder(&id),
                error: Some(e.to_string()),
            })
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store_connected: state.orchestrator.store().is_some(),
        llm_configured: state.llm_configured,
    })
}
