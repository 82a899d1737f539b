//! Shared helpers for integration tests: local stand-ins for the
//! chat-completion endpoint and for web pages.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serve a router on an ephemeral local port.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A port with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Scripted chat-completion server. Replies are returned in order; the last
/// one repeats once the script runs out.
#[derive(Clone)]
pub struct MockLlm {
    replies: Arc<Vec<Value>>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockLlm {
    pub fn new(replies: Vec<Value>) -> Self {
        Self {
            replies: Arc::new(replies),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Start serving; returns the `/v1` base URL.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(self.clone());
        let addr = spawn(app).await;
        format!("http://{}/v1", addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn completions(State(mock): State<MockLlm>, Json(body): Json<Value>) -> Json<Value> {
    mock.requests.lock().unwrap().push(body);
    let n = mock.calls.fetch_add(1, Ordering::SeqCst);
    let reply = mock.replies[n.min(mock.replies.len() - 1)].clone();
    Json(reply)
}

/// Completion whose message is a final text answer.
pub fn final_reply(content: &str) -> Value {
    completion(
        json!({ "role": "assistant", "content": content }),
        "stop",
    )
}

/// Completion whose message asks for one tool call.
pub fn tool_reply(id: &str, name: &str, arguments: &str) -> Value {
    completion(
        json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": id,
                "type": "function",
                "function": { "name": name, "arguments": arguments }
            }]
        }),
        "tool_calls",
    )
}

fn completion(message: Value, finish_reason: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000u32,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": message,
            "finish_reason": finish_reason,
            "logprobs": null
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

pub const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>HP Pavilion 15 Review</title></head>
  <body>
    <nav>Home | Laptops</nav>
    <article>
      <h1>HP Pavilion 15</h1>
      <p>A solid budget laptop for ₹49,990.</p>
    </article>
  </body>
</html>"#;

/// Local web site with an article, a missing page and a slow page.
pub async fn start_site() -> String {
    let app = Router::new()
        .route("/article", get(|| async { Html(ARTICLE_PAGE) }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "not here").into_response() }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<html><body><p>late</p></body></html>")
            }),
        );
    let addr = spawn(app).await;
    format!("http://{}", addr)
}
