//! Web page content extraction.
//!
//! A best-effort extractor: fetch a page, pick a title and the most likely
//! main-content container, and cap the result so it fits in a model context.
//! Every failure is folded into the returned text; the agent sees it as a
//! normal tool result.

use crate::config::FetcherSettings;
use crate::error::{Result, WebnavError};
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Containers tried in order; the first match provides the content.
const CONTENT_SELECTORS: [&str; 7] = [
    "article",
    "main",
    ".article",
    ".post-content",
    ".entry-content",
    "#content",
    ".content",
];

/// Paragraphs used when no content container matches.
const MAX_FALLBACK_PARAGRAPHS: usize = 10;

const NO_TITLE: &str = "No title found";
const NO_CONTENT: &str = "No content could be extracted from this page.";
const TRUNCATION_MARKER: &str = "... (content truncated)";

/// Title and content pulled out of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtract {
    pub url: String,
    pub title: String,
    pub content: String,
}

impl PageExtract {
    /// Format the extract the way the agent receives it.
    pub fn render(&self) -> String {
        format!(
            "Content extraction for '{}':\n\nTitle: {}\n\nContent:\n{}",
            self.url, self.title, self.content
        )
    }
}

/// HTTP fetcher with a fixed user agent and timeout.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl ContentFetcher {
    /// Create a fetcher from settings.
    pub fn new(settings: &FetcherSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            max_chars: settings.max_chars,
        })
    }

    /// Fetch a page and return its extract, or a description of what went wrong.
    pub async fn fetch(&self, url: &str) -> String {
        info!("Extracting content from URL: {}", url);

        match self.fetch_page(url).await {
            Ok(page) => page.render(),
            Err(WebnavError::Fetch(msg)) | Err(WebnavError::InvalidInput(msg)) => {
                warn!("Content extraction failed: {}", msg);
                format!("Failed to extract content: {}", msg)
            }
            Err(e) => {
                warn!("Content extraction failed: {}", e);
                format!("Failed to extract content: {}", e)
            }
        }
    }

    /// Fetch a page and extract title and content.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<PageExtract> {
        let parsed = url::Url::parse(url)
            .map_err(|e| WebnavError::InvalidInput(format!("invalid URL '{}': {}", url, e)))?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(WebnavError::Fetch(format!(
                "HTTP status code {}",
                status.as_u16()
            )));
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);

        // Html is !Send and parsing is CPU-bound, keep both off the runtime threads.
        let max_chars = self.max_chars;
        let (title, content) = tokio::task::spawn_blocking(move || extract_page(&html, max_chars))
            .await
            .map_err(|e| WebnavError::Fetch(format!("extraction task failed: {}", e)))?;

        Ok(PageExtract {
            url: url.to_string(),
            title,
            content,
        })
    }
}

/// Extract `(title, content)` from an HTML document.
pub fn extract_page(html: &str, max_chars: usize) -> (String, String) {
    let doc = Html::parse_document(html);

    let title = first_match(&doc, "title")
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let content = container_text(&doc)
        .or_else(|| paragraph_text(&doc))
        .or_else(|| body_text(&doc, max_chars))
        .unwrap_or_else(|| NO_CONTENT.to_string());

    (title, truncate_chars(&content, max_chars))
}

fn first_match<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

/// Text of an element with each text node trimmed and concatenated.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

fn container_text(doc: &Html) -> Option<String> {
    CONTENT_SELECTORS
        .iter()
        .find_map(|selector| first_match(doc, selector))
        .map(element_text)
        .filter(|t| !t.is_empty())
}

fn paragraph_text(doc: &Html) -> Option<String> {
    let sel = Selector::parse("p").ok()?;
    let text = doc
        .select(&sel)
        .take(MAX_FALLBACK_PARAGRAPHS)
        .map(element_text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn body_text(doc: &Html, max_chars: usize) -> Option<String> {
    let text = element_text(first_match(doc, "body")?);
    if text.is_empty() {
        None
    } else {
        Some(text.chars().take(max_chars).collect())
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str(TRUNCATION_MARKER);
        cut
    } else {
        text.to_string()
    }
}
