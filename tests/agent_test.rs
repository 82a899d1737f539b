//! Agent loop against a scripted chat-completion server.

mod common;

use common::{final_reply, tool_reply, MockLlm};
use webnav::agent::{Agent, AgentRunner};
use webnav::config::{Prompts, Settings};
use webnav::WebnavError;

fn agent(base_url: &str, max_iterations: usize) -> Agent {
    let mut settings = Settings::default();
    settings.llm.base_url = base_url.to_string();
    settings.llm.model = "test-model".to_string();
    settings.llm.max_iterations = max_iterations;
    settings.llm.timeout_secs = 10;
    Agent::from_settings(&settings, &Prompts::default()).unwrap()
}

#[tokio::test]
async fn answers_without_tools() {
    let llm = MockLlm::new(vec![final_reply("<think>easy</think>Paris.\n\nIt is the capital.")]);
    let base = llm.start().await;

    let response = agent(&base, 5).run("Capital of France?").await.unwrap();

    assert_eq!(response.content, "<think>easy</think>Paris.\n\nIt is the capital.");
    assert!(response.tool_calls.is_empty());
    assert_eq!(response.iterations, 1);

    let requests = llm.requests();
    assert_eq!(requests[0]["model"], "test-model");
    assert_eq!(requests[0]["messages"][0]["role"], "system");
    assert_eq!(requests[0]["messages"][1]["content"], "Capital of France?");
    let tool_names: Vec<&str> = requests[0]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["function"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(tool_names, vec!["web_search", "extract_webpage_content"]);
}

#[tokio::test]
async fn runs_search_then_answers() {
    let llm = MockLlm::new(vec![
        tool_reply("call_1", "web_search", r#"{"query": "laptop under ₹50k"}"#),
        final_reply("Get the HP Pavilion 15.\n\nIt costs ₹49,990."),
    ]);
    let base = llm.start().await;

    let response = agent(&base, 5).run("Which laptop should I buy?").await.unwrap();

    assert_eq!(response.iterations, 2);
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].name, "web_search");
    assert!(response.tool_calls[0].result.contains("HP Pavilion 15"));

    // The tool result goes back to the model on the next turn.
    let second = &llm.requests()[1];
    let messages = second["messages"].as_array().unwrap();
    let tool_msg = messages.iter().find(|m| m["role"] == "tool").unwrap();
    assert_eq!(tool_msg["tool_call_id"], "call_1");
    assert!(tool_msg["content"]
        .as_str()
        .unwrap()
        .starts_with("Search results for 'laptop under ₹50k'"));
}

#[tokio::test]
async fn reads_page_with_fetch_tool() {
    let site = common::start_site().await;
    let args = serde_json::json!({ "url": format!("{}/article", site) }).to_string();
    let llm = MockLlm::new(vec![
        tool_reply("call_1", "extract_webpage_content", &args),
        final_reply("The Pavilion 15 is a budget laptop."),
    ]);
    let base = llm.start().await;

    let response = agent(&base, 5).run("Tell me about the Pavilion").await.unwrap();

    assert!(response.tool_calls[0]
        .result
        .contains("Title: HP Pavilion 15 Review"));
}

#[tokio::test]
async fn malformed_arguments_are_reported_to_the_model() {
    let llm = MockLlm::new(vec![
        tool_reply("call_1", "web_search", "{not json"),
        tool_reply("call_2", "summon_dragon", "{}"),
        final_reply("Sorry, I could not search."),
    ]);
    let base = llm.start().await;

    let response = agent(&base, 5).run("anything").await.unwrap();

    assert_eq!(response.content, "Sorry, I could not search.");
    assert_eq!(response.tool_calls.len(), 2);
    assert!(response.tool_calls[0]
        .result
        .starts_with("Failed to parse tool call"));
    assert!(response.tool_calls[1].result.contains("Unknown tool: summon_dragon"));
}

#[tokio::test]
async fn stops_after_max_iterations() {
    let llm = MockLlm::new(vec![tool_reply("call_n", "web_search", r#"{"query": "again"}"#)]);
    let base = llm.start().await;

    let result = agent(&base, 3).run("loop forever").await;

    assert!(matches!(result, Err(WebnavError::Agent(ref msg)) if msg.contains("maximum iterations (3)")));
    assert_eq!(llm.calls(), 3);
}

#[tokio::test]
async fn unreachable_endpoint_is_an_error() {
    let addr = common::closed_port().await;

    let result = agent(&format!("http://{}/v1", addr), 3).run("hello").await;

    assert!(matches!(result, Err(WebnavError::OpenAI(_))));
}
