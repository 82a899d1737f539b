//! Doctor command - verify configuration, chat store and LLM endpoint.

use crate::cli::Output;
use crate::config::{Settings, StoreProvider};
use crate::store::open_store;
use console::style;
use std::time::Duration;

/// How long to wait for the LLM endpoint to answer.
const PROBE_TIMEOUT_SECS: u64 = 5;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("webnav Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    println!("{}", style("Chat Store").bold());
    let store_check = check_store(settings).await;
    store_check.print();
    checks.push(store_check);

    println!();

    println!("{}", style("Language Model").bold());
    let llm_checks = vec![
        check_llm_endpoint(&settings.llm.base_url).await,
        check_model(&settings.llm.model),
    ];
    for check in &llm_checks {
        check.print();
    }
    checks.extend(llm_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. The server will still start, but answers will fail.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! webnav is ready to use.");
    }

    Ok(())
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: webnav config init",
        )
    }
}

/// Check that the configured chat store opens and answers a query.
async fn check_store(settings: &Settings) -> CheckResult {
    if settings.store.provider == StoreProvider::None {
        return CheckResult::warning(
            "Chat store",
            "disabled",
            "Set store.provider = \"sqlite\" to keep chat history",
        );
    }

    match open_store(settings) {
        Ok(Some(store)) => match store.count().await {
            Ok(count) => CheckResult::ok(
                "Chat store",
                &format!("{} ({} chats)", store.name(), count),
            ),
            Err(e) => CheckResult::error(
                "Chat store",
                &format!("query failed: {}", e),
                "Check the database file permissions",
            ),
        },
        Ok(None) => CheckResult::warning("Chat store", "disabled", "No store configured"),
        Err(e) => CheckResult::error(
            "Chat store",
            &format!("{}", e),
            &format!("Check store.sqlite_path ({})", settings.sqlite_path().display()),
        ),
    }
}

/// Check that the chat-completion endpoint answers `GET /models`.
async fn check_llm_endpoint(base_url: &str) -> CheckResult {
    let url = models_url(base_url);
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => return CheckResult::error("LLM endpoint", &e.to_string(), "Internal error"),
    };

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => CheckResult::ok("LLM endpoint", base_url),
        Ok(resp) => CheckResult::warning(
            "LLM endpoint",
            &format!("{} answered {}", url, resp.status()),
            "The server is up but /models failed; completions may still work",
        ),
        Err(e) => CheckResult::error(
            "LLM endpoint",
            &format!("unreachable: {}", e),
            "Start your local model server or set llm.base_url",
        ),
    }
}

fn check_model(model: &str) -> CheckResult {
    if model.trim().is_empty() {
        CheckResult::error("Model", "not set", "Set llm.model in the config file")
    } else {
        CheckResult::ok("Model", model)
    }
}

fn models_url(base_url: &str) -> String {
    format!("{}/models", base_url.trim_end_matches('/'))
}
