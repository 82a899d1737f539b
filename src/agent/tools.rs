//! Tool definitions and dispatch for the agent.

use crate::error::{Result, WebnavError};
use crate::tools::{ContentFetcher, SearchBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search the web for a topic.
    WebSearch { query: String },

    /// Extract the readable content of a web page.
    ExtractWebpageContent { url: String },
}

/// Tool execution context with the search backend and page fetcher.
pub struct ToolContext {
    pub search: Arc<dyn SearchBackend>,
    pub fetcher: ContentFetcher,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(search: Arc<dyn SearchBackend>, fetcher: ContentFetcher) -> Self {
        Self { search, fetcher }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::WebSearch { query } => self.search.search(query).await,
            ToolCall::ExtractWebpageContent { url } => Ok(self.fetcher.fetch(url).await),
        }
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "web_search".to_string(),
                description: Some(
                    "Search the web and return result titles, descriptions and links. \
                    Use this first to find sources for the user's question."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "extract_webpage_content".to_string(),
                description: Some(
                    "Extract the title and main text of a specific webpage. \
                    Use this to read a page found through web_search."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "Absolute http(s) URL of the page"
                        }
                    },
                    "required": ["url"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| WebnavError::Agent(format!("Invalid tool arguments: {}", e)))?;

    let string_arg = |key: &str| -> Result<String> {
        args[key]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WebnavError::Agent(format!("Missing '{}' argument", key)))
    };

    match name {
        "web_search" => Ok(ToolCall::WebSearch {
            query: string_arg("query")?,
        }),
        "extract_webpage_content" => Ok(ToolCall::ExtractWebpageContent {
            url: string_arg("url")?,
        }),
        _ => Err(WebnavError::Agent(format!("Unknown tool: {}", name))),
    }
}
