//! End-to-end crawl tests
//!
//! A small site is served by wiremock and crawled with the real HTTP fetcher,
//! configured the same way the binary configures it.

use ripple_count::config::{parse_config, Config};
use ripple_count::crawler::{CrawlEngine, FetchFailure};
use ripple_count::fetcher::{build_http_client, HttpPageFetcher};
use ripple_count::output::write_result_to;
use ripple_count::profiler::{Profiled, Profiler};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration seeded with `seeds`
fn create_test_config(seeds: &[String], max_depth: u32, extra: &str) -> Config {
    let seeds = seeds
        .iter()
        .map(|seed| format!("\"{}\"", seed))
        .collect::<Vec<_>>()
        .join(", ");
    let content = format!(
        r#"
[crawler]
start-pages = [{seeds}]
parallelism = 4
max-depth = {max_depth}
timeout-seconds = 30
popular-word-count = 10
{extra}

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
"#
    );
    parse_config(&content).expect("Failed to parse test config")
}

fn build_engine(config: &Config) -> CrawlEngine<HttpPageFetcher> {
    let client = build_http_client(&config.user_agent).expect("Failed to build client");
    let fetcher = HttpPageFetcher::new(
        client,
        config
            .ignored_word_patterns()
            .expect("Invalid word patterns"),
    );
    CrawlEngine::new(fetcher, config.crawler_settings()).expect("Failed to create engine")
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

/// Mounts a site with a cycle, a shared child and a private page
///
/// ```text
/// /       -> /page1, /page2, /private
/// /page1  -> /
/// /page2  -> /page1
/// ```
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <p>alpha beta alpha</p>
        <a href="/page1"></a><a href="/page2"></a><a href="/private"></a>
        </body></html>"#,
    )
    .await;
    mount_page(
        server,
        "/page1",
        r#"<html><body><p>Beta gamma.</p><a href="/"></a></body></html>"#,
    )
    .await;
    mount_page(
        server,
        "/page2",
        r#"<html><body><p>alpha</p><a href="/page1"></a></body></html>"#,
    )
    .await;
}

fn counts(result: &ripple_count::CrawlResult) -> Vec<(&str, u64)> {
    result
        .word_counts()
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    // The ignored page must never be requested
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("secret", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &[format!("{}/", mock_server.uri())],
        3,
        r#"ignored-urls = [".*/private"]"#,
    );
    let result = build_engine(&config).crawl(&config.crawler.start_pages).await;

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(counts(&result), vec![("alpha", 3), ("beta", 2), ("gamma", 1)]);
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body>root <a href="/leaf"></a><a href="/leaf"></a><a href="/"></a></body></html>"#,
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/leaf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body>leaf <a href="/"></a></body></html>"#,
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = format!("{}/", mock_server.uri());
    let config = create_test_config(&[seed.clone(), seed], 5, "");
    let result = build_engine(&config).crawl(&config.crawler.start_pages).await;

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(counts(&result), vec![("leaf", 1), ("root", 1)]);
}

#[tokio::test]
async fn test_depth_limits_reach() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    // Depth 1 visits only the seed
    let config = create_test_config(&[format!("{}/", mock_server.uri())], 1, "");
    let result = build_engine(&config).crawl(&config.crawler.start_pages).await;

    assert_eq!(result.urls_visited(), 1);
    assert_eq!(counts(&result), vec![("alpha", 2), ("beta", 1)]);
}

#[tokio::test]
async fn test_failed_pages_count_as_visited() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>working <a href="/broken"></a><a href="/image.png"></a></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/image.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8, 1, 2], "image/png"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&[format!("{}/", mock_server.uri())], 2, "");
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchFailure>();
    let engine = build_engine(&config).with_failure_reporter(tx);
    let result = engine.crawl(&config.crawler.start_pages).await;

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(counts(&result), vec![("working", 1)]);

    let mut failed = Vec::new();
    while let Ok(failure) = rx.try_recv() {
        failed.push(failure.url);
    }
    failed.sort();
    assert_eq!(
        failed,
        vec![
            format!("{}/broken", mock_server.uri()),
            format!("{}/image.png", mock_server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_ignored_words_config() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(
        &[format!("{}/", mock_server.uri())],
        3,
        r#"ignored-urls = [".*/private"]
ignored-words = ["alpha", "g.*"]"#,
    );
    let result = build_engine(&config).crawl(&config.crawler.start_pages).await;

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(counts(&result), vec![("beta", 2)]);
}

#[tokio::test]
async fn test_profiled_crawl_writes_report_and_json() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(
        &[format!("{}/", mock_server.uri())],
        3,
        r#"ignored-urls = [".*/private"]"#,
    );
    let profiler = Profiler::new();
    let client = build_http_client(&config.user_agent).expect("Failed to build client");
    let fetcher = Profiled::new(
        HttpPageFetcher::new(client, Default::default()),
        profiler.clone(),
    );
    let fetcher_name = fetcher.name().to_string();
    let engine =
        CrawlEngine::new(fetcher, config.crawler_settings()).expect("Failed to create engine");

    let result = profiler
        .profile("CrawlEngine#crawl", engine.crawl(&config.crawler.start_pages))
        .await;
    assert_eq!(result.urls_visited(), 3);

    let mut json = Vec::new();
    write_result_to(&result, &mut json).expect("Failed to write result");
    let value: serde_json::Value = serde_json::from_slice(&json).expect("Invalid JSON");
    assert_eq!(value["urlsVisited"], 3);
    assert_eq!(value["wordCounts"]["alpha"], 3);

    let mut report = Vec::new();
    profiler
        .write_data_to(&mut report)
        .expect("Failed to write profile");
    let report = String::from_utf8(report).expect("Report is not UTF-8");
    assert!(report.starts_with("Run at "));
    assert!(report.contains("CrawlEngine#crawl took "));
    assert!(report.contains(&format!("{} took ", fetcher_name)));
}
