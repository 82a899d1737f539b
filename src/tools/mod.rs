//! Tool backends available to the agent: web search and page extraction.

mod fetcher;
mod search;

pub use fetcher::{extract_page, ContentFetcher, PageExtract};
pub use search::{SearchBackend, StubSearch};
