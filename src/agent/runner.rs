//! Agent runner with a bounded tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::{Prompts, Settings};
use crate::error::{Result, WebnavError};
use crate::openai::create_client;
use crate::tools::{ContentFetcher, StubSearch};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionResponseMessage, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default bound on model calls per task.
const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Anything that can turn a user message into an agent response.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Run one task to completion.
    async fn run(&self, message: &str) -> Result<AgentResponse>;
}

/// What the model asked for in one turn.
#[derive(Debug, Clone)]
pub enum AgentStep {
    /// Call these tools, then ask the model again.
    ToolCalls(Vec<ChatCompletionMessageToolCall>),
    /// The model is done.
    Final(String),
}

impl AgentStep {
    /// Classify a model reply.
    pub fn from_message(message: &ChatCompletionResponseMessage) -> Self {
        match &message.tool_calls {
            Some(calls) if !calls.is_empty() => AgentStep::ToolCalls(calls.clone()),
            _ => AgentStep::Final(message.content.clone().unwrap_or_default()),
        }
    }
}

/// Agent that can search the web and read pages to answer a question.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given client, tool context and model.
    pub fn new(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        tools: ToolContext,
        model: &str,
    ) -> Self {
        Self {
            client,
            model: model.to_string(),
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: Prompts::default().agent_system(),
        }
    }

    /// Build an agent from settings: LLM client, stub search and page fetcher.
    pub fn from_settings(settings: &Settings, prompts: &Prompts) -> Result<Self> {
        let client = create_client(&settings.llm)?;
        let tools = ToolContext::new(
            Arc::new(StubSearch::new()),
            ContentFetcher::new(&settings.fetcher)?,
        );

        Ok(Self::new(client, tools, &settings.llm.model)
            .with_system_prompt(&prompts.agent_system())
            .with_max_iterations(settings.llm.max_iterations))
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Model name used for completions.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for its next step.
    async fn next_step(&self, messages: &[ChatCompletionRequestMessage]) -> Result<AgentStep> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages.to_vec())
            .tools(tool_definitions())
            .build()
            .map_err(|e| WebnavError::Agent(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| WebnavError::OpenAI(format!("Agent API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| WebnavError::Agent("No response from model".to_string()))?;

        Ok(AgentStep::from_message(&choice.message))
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Bad arguments and tool failures become the tool result so the model
    /// can correct itself on the next turn.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }
}

#[async_trait]
impl AgentRunner for Agent {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn run(&self, message: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| WebnavError::Agent(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(message.to_string())
                .build()
                .map_err(|e| WebnavError::Agent(e.to_string()))?
                .into(),
        ];

        let mut tool_calls_made = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!("Agent iteration {}", iteration);

            let tool_calls = match self.next_step(&messages).await? {
                AgentStep::Final(content) => {
                    info!(
                        "Agent finished after {} iteration(s), {} tool call(s)",
                        iteration,
                        tool_calls_made.len()
                    );
                    return Ok(AgentResponse {
                        content,
                        tool_calls: tool_calls_made,
                        iterations: iteration,
                    });
                }
                AgentStep::ToolCalls(calls) => calls,
            };

            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls.clone())
                .build()
                .map_err(|e| WebnavError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            for tool_call in &tool_calls {
                let record = self.execute_tool_call(tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| WebnavError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }

        Err(WebnavError::Agent(format!(
            "Agent exceeded maximum iterations ({})",
            self.max_iterations
        )))
    }
}

/// Response from an agent run.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(value: serde_json::Value) -> ChatCompletionResponseMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "web_search".to_string(),
            arguments: r#"{"query": "test"}"#.to_string(),
            result: "Search results".to_string(),
        };
        assert_eq!(format!("{}", record), r#"web_search({"query": "test"})"#);
    }

    #[test]
    fn test_step_final_answer() {
        let step = AgentStep::from_message(&message(serde_json::json!({
            "role": "assistant",
            "content": "Done."
        })));
        assert!(matches!(step, AgentStep::Final(ref c) if c == "Done."));
    }

    #[test]
    fn test_step_missing_content_is_empty_final() {
        let step = AgentStep::from_message(&message(serde_json::json!({
            "role": "assistant",
            "content": null,
            "tool_calls": []
        })));
        assert!(matches!(step, AgentStep::Final(ref c) if c.is_empty()));
    }

    #[test]
    fn test_step_tool_calls() {
        let step = AgentStep::from_message(&message(serde_json::json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "web_search", "arguments": "{\"query\":\"rust\"}"}
            }]
        })));
        match step {
            AgentStep::ToolCalls(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].function.name, "web_search");
            }
            AgentStep::Final(_) => panic!("Expected tool calls"),
        }
    }
}
