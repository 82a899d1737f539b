//! Configuration module for webnav.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts};
pub use settings::{
    FetcherSettings, GeneralSettings, LlmSettings, PromptSettings, ServerSettings, Settings,
    StoreProvider, StoreSettings,
};
