//! Web search backends.
//!
//! Only an offline stub exists so far. It returns canned result blocks for a
//! few known topics and templated links for everything else.

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

/// Rupee amounts around fifty thousand, e.g. "₹50k" or "₹ 50,000".
static RUPEE_50K: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)₹\s*50(\s*k\b|,?000)").expect("valid rupee regex")
});

/// Trait for search backends exposed to the agent.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a query and return result text for the model.
    async fn search(&self, query: &str) -> Result<String>;

    /// Short backend name for logs and diagnostics.
    fn name(&self) -> &str;
}

/// Deterministic offline search with canned results.
#[derive(Debug, Clone, Default)]
pub struct StubSearch;

impl StubSearch {
    pub fn new() -> Self {
        Self
    }

    /// Build the result block for a query.
    pub fn results_for(query: &str) -> String {
        let lowered = query.to_lowercase();
        let body = if lowered.contains("laptop") || RUPEE_50K.is_match(query) {
            LAPTOP_RESULTS.to_string()
        } else if lowered.contains("javascript") {
            JAVASCRIPT_RESULTS.to_string()
        } else {
            generic_results(query)
        };

        format!("Search results for '{}':\n\n{}", query, body)
    }
}

#[async_trait]
impl SearchBackend for StubSearch {
    async fn search(&self, query: &str) -> Result<String> {
        info!("Starting web search for query: {}", query);
        Ok(Self::results_for(query))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

const LAPTOP_RESULTS: &str = "\
1. Title: Best Laptops Under ₹50,000 in India - Amazon.in
   Description: Wide range of laptops under 50k with latest processors and features.
   Link: https://www.amazon.in/laptops-under-50000

2. Title: Top 10 Laptops Under ₹50,000 - Flipkart
   Description: Compare the best laptops under 50k with detailed specifications and reviews.
   Link: https://www.flipkart.com/laptops-under-50000

3. Title: HP Pavilion 15 - Best Budget Laptop Under 50k
   Description: HP Pavilion 15 with 11th Gen Intel Core i5, 8GB RAM, 512GB SSD for ₹49,990.
   Link: https://www.hp.com/pavilion-15";

const JAVASCRIPT_RESULTS: &str = "\
1. Title: JavaScript Tutorial - W3Schools
   Description: Well organized and easy to understand Web building tutorials with lots of examples.
   Link: https://www.w3schools.com/js/

2. Title: Learn JavaScript - MDN Web Docs
   Description: JavaScript (JS) is a lightweight interpreted programming language with first-class functions.
   Link: https://developer.mozilla.org/en-US/docs/Web/JavaScript

3. Title: JavaScript Tutorial - Tutorialspoint
   Description: JavaScript is a lightweight, interpreted programming language with object-oriented capabilities.
   Link: https://www.tutorialspoint.com/javascript/index.htm";

fn generic_results(query: &str) -> String {
    let plus = query.replace(' ', "+");
    let underscore = query.replace(' ', "_");

    format!(
        "1. Title: Top results for {q}\n   Description: Comprehensive information about {q}.\n   Link: https://www.google.com/search?q={plus}\n\n\
         2. Title: {q} - Wikipedia\n   Description: Detailed information and background about {q}.\n   Link: https://en.wikipedia.org/wiki/{underscore}\n\n\
         3. Title: Latest on {q}\n   Description: Recent news and updates about {q}.\n   Link: https://news.google.com/search?q={plus}",
        q = query,
        plus = plus,
        underscore = underscore,
    )
}
