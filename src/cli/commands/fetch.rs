//! Fetch command: run the page extractor directly.

use crate::config::Settings;
use crate::tools::ContentFetcher;
use anyhow::Result;

/// Print the extract the agent would receive for a URL.
pub async fn run_fetch(url: &str, settings: Settings) -> Result<()> {
    let fetcher = ContentFetcher::new(&settings.fetcher)?;
    println!("{}", fetcher.fetch(url).await);
    Ok(())
}
