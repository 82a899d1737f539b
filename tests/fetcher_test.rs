//! Content fetcher against a local web site.

mod common;

use webnav::config::FetcherSettings;
use webnav::tools::ContentFetcher;

fn fetcher() -> ContentFetcher {
    ContentFetcher::new(&FetcherSettings::default()).unwrap()
}

#[tokio::test]
async fn extracts_title_and_article() {
    let site = common::start_site().await;
    let url = format!("{}/article", site);

    let text = fetcher().fetch(&url).await;

    assert!(text.starts_with(&format!("Content extraction for '{}':", url)));
    assert!(text.contains("Title: HP Pavilion 15 Review"));
    assert!(text.contains("HP Pavilion 15A solid budget laptop for ₹49,990."));
    assert!(!text.contains("Home | Laptops"));
}

#[tokio::test]
async fn not_found_reports_status_code() {
    let site = common::start_site().await;

    let text = fetcher().fetch(&format!("{}/missing", site)).await;

    assert_eq!(text, "Failed to extract content: HTTP status code 404");
}

#[tokio::test]
async fn connection_failure_is_described() {
    let addr = common::closed_port().await;

    let text = fetcher().fetch(&format!("http://{}/page", addr)).await;

    assert!(text.starts_with("Failed to extract content: "));
    assert!(text.len() > "Failed to extract content: ".len());
}

#[tokio::test]
async fn slow_page_times_out() {
    let site = common::start_site().await;
    let settings = FetcherSettings {
        timeout_secs: 1,
        ..FetcherSettings::default()
    };
    let fetcher = ContentFetcher::new(&settings).unwrap();

    let text = fetcher.fetch(&format!("{}/slow", site)).await;

    assert!(text.starts_with("Failed to extract content: "));
}

#[tokio::test]
async fn fetch_page_returns_typed_extract() {
    let site = common::start_site().await;

    let page = fetcher()
        .fetch_page(&format!("{}/article", site))
        .await
        .unwrap();

    assert_eq!(page.title, "HP Pavilion 15 Review");
    assert!(page.content.starts_with("HP Pavilion 15"));
}
