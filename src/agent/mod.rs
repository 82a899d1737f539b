//! Agent system for answering questions with tool calling.
//!
//! Provides an LLM agent that can search the web and read pages before it
//! writes its final answer. The loop is bounded by a maximum number of
//! model calls.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, AgentRunner, AgentStep, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
