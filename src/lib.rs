//! webnav - a web-navigating question answering agent
//!
//! A small backend that takes a natural-language question, lets an LLM agent
//! search the web and read pages, and returns a summarized answer. Every
//! answered question is kept as a chat record.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `tools` - Search backend and page content fetcher
//! - `agent` - Bounded tool-calling loop against an OpenAI-compatible API
//! - `summarizer` - Splits reasoning, direct answer and full response
//! - `store` - Chat record persistence (SQLite, in-memory)
//! - `orchestrator` - One task from message to stored record
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use webnav::config::Settings;
//! use webnav::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::from_settings(&settings)?;
//!
//!     let outcome = orchestrator.execute_task("Best laptop under ₹50k?", true).await;
//!     println!("{}", outcome.record.results[0].text);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod server;
pub mod store;
pub mod summarizer;
pub mod tools;

pub use error::{Result, WebnavError};
