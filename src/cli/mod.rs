//! CLI module for webnav.

pub mod commands;
mod output;

pub use output::{content_preview, Output};

use clap::{Parser, Subcommand};

/// webnav - a web-navigating question answering agent
///
/// Answers questions with an LLM that can search the web and read pages,
/// and keeps a history of every answered question.
#[derive(Parser, Debug)]
#[command(name = "webnav")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "WEBNAV_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a question from the terminal
    Ask {
        /// The question to ask
        question: String,

        /// Show the model's reasoning block
        #[arg(long)]
        thinking: bool,

        /// Do not store the answer in the chat history
        #[arg(long)]
        no_save: bool,
    },

    /// List stored chats, newest first
    History {
        /// Maximum number of chats to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show a stored chat
    Show {
        /// Chat ID
        id: String,
    },

    /// Extract the content of a web page, as the agent would see it
    Fetch {
        /// Page URL
        url: String,
    },

    /// Check configuration, chat store and LLM endpoint
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}
