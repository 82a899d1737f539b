//! Prompt templates for webnav.
//!
//! The agent prompt can be replaced by placing an `agent.toml` file in the
//! custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the web navigator agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a web navigator assistant. Answer the user's question accurately by searching the web and reading pages.

Tools:
1. web_search: search the web for a topic
2. extract_webpage_content: read the content of a specific webpage URL

For every question:
1. Work out what information is needed
2. Call web_search to find relevant sources
3. Call extract_webpage_content on promising URLs when more detail is needed
4. Reason about what you found inside a <think>...</think> block
5. Give a direct, concise answer in the first paragraph after the block
6. Add supporting detail and context in the following paragraphs

Structure every reply like this:
<think>
Your analysis and reasoning (hidden from the user)
</think>

A direct answer to the question in one or two sentences.

Further details, context and supporting information.

Cite your sources and keep the answer easy to read."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the defaults, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let agent_path = PathBuf::from(shellexpand::tilde(dir).to_string()).join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// The agent system prompt with custom variables substituted.
    pub fn agent_system(&self) -> String {
        Self::render(&self.agent.system, &self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_describes_think_block() {
        let prompts = Prompts::default();
        assert!(prompts.agent.system.contains("<think>"));
        assert!(prompts.agent.system.contains("web_search"));
        assert!(prompts.agent.system.contains("extract_webpage_content"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_load_custom_agent_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("agent.toml"),
            "system = \"You answer questions about {{topic}}.\"\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), "rust".to_string());

        let prompts = Prompts::load(dir.path().to_str(), Some(&vars)).unwrap();
        assert_eq!(prompts.agent_system(), "You answer questions about rust.");
    }
}
