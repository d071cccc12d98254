//! HTTP fetcher tests against a mock server

use ripple_count::config::UserAgentConfig;
use ripple_count::fetcher::{build_http_client, HttpPageFetcher};
use ripple_count::pattern::PatternSet;
use ripple_count::{FetchError, PageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: Some("https://example.com/contact".to_string()),
    }
}

fn test_fetcher(ignored_words: PatternSet) -> HttpPageFetcher {
    let client = build_http_client(&test_user_agent()).expect("Failed to build client");
    HttpPageFetcher::new(client, ignored_words)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_fetch_html_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(html(
            r#"<html><head><title>Skipped</title></head><body>
            <h1>Rust Crawlers</h1>
            <p>Crawlers crawl, <a href="/next">next</a></p>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = test_fetcher(PatternSet::default())
        .fetch(&format!("{}/article", base_url))
        .await
        .expect("Fetch failed");

    assert_eq!(page.words, vec!["rust", "crawlers", "crawlers", "crawl", "next"]);
    assert_eq!(page.links, vec![format!("{}/next", base_url)]);
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(html("<html><body>identified</body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = test_fetcher(PatternSet::default())
        .fetch(&format!("{}/", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(page.words, vec!["identified"]);
}

#[tokio::test]
async fn test_fetch_applies_ignored_words() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<html><body>the cat and the hat</body></html>"))
        .mount(&mock_server)
        .await;

    let ignored = PatternSet::compile(&["the", "and"]).expect("Invalid patterns");
    let page = test_fetcher(ignored)
        .fetch(&format!("{}/", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(page.words, vec!["cat", "hat"]);
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = test_fetcher(PatternSet::default())
        .fetch(&format!("{}/missing", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_non_html_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"words":["nope"]}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    let result = test_fetcher(PatternSet::default())
        .fetch(&format!("{}/data.json", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::NotHtml { .. })));
}
