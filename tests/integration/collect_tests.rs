//! Integration tests for the collector
//!
//! These tests use wiremock to create mock HTTP servers and run every
//! traversal strategy end-to-end over real HTTP.

use std::time::Duration;
use sumi_sieve::collector::{collector_from_config, Fetch, FetchError, HttpFetcher};
use sumi_sieve::config::{
    CollectorConfig, Config, ExtractorConfig, ExtractorKind, OutputConfig, OutputKind,
    RunnerConfig, StrategyName, UserAgentConfig,
};
use sumi_sieve::extract::ConfiguredExtractor;
use sumi_sieve::output::ConfiguredOutput;
use sumi_sieve::Runner;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestSieve".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: Some("test@example.com".to_string()),
    }
}

/// Creates a test configuration for the given strategy against `base_url`
fn create_test_config(base_url: &str, strategy: StrategyName, target_pattern: &str) -> Config {
    Config {
        title: Some("integration".to_string()),
        runner: RunnerConfig::default(),
        user_agent: user_agent(),
        collector: CollectorConfig {
            strategy,
            base_url: base_url.to_string(),
            target_pattern: target_pattern.to_string(),
            sitemap_path: None,
            robots_path: None,
            start_path: None,
            crawl_pattern: None,
        },
        extractor: ExtractorConfig::default(),
        output: OutputConfig::default(),
    }
}

async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

fn urlset(locs: &[String]) -> String {
    let urls: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        urls
    )
}

fn sitemap_index(locs: &[String]) -> String {
    let sitemaps: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        sitemaps
    )
}

#[tokio::test]
async fn test_http_fetcher_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header(
            "user-agent",
            "TestSieve/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<title>Page</title><p>Body</p>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent()).unwrap();
    let url = format!("{}/page", mock_server.uri());
    let document = fetcher.fetch(&url).await.unwrap();

    assert_eq!(document.url(), url);
    assert_eq!(document.title(), Some("Page".to_string()));
    assert!(document.source().contains("<p>Body</p>"));
}

#[tokio::test]
async fn test_http_fetcher_non_ok_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent()).unwrap();
    let url = format!("{}/gone", mock_server.uri());
    let error = fetcher.fetch(&url).await.unwrap_err();

    match error {
        FetchError::NonOkStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("expected NonOkStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_fetcher_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&user_agent()).unwrap();
    let error = fetcher
        .fetch(&format!("{}/broken", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(error, FetchError::NonOkStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_http_fetcher_unreachable_host() {
    let fetcher = HttpFetcher::new(&user_agent()).unwrap();
    let error = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();

    assert!(matches!(error, FetchError::Transport { .. }));
    assert_eq!(error.url(), "http://127.0.0.1:1/");
}

#[tokio::test]
async fn test_crawl_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The category page links back to itself and to an already seen product
    mount_page(
        &mock_server,
        "/",
        links(&["/products/1/", "/categories/fruit/", "/", "https://elsewhere.example/products/9/"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/categories/fruit/",
        links(&["/products/2/", "/products/1/", "/categories/fruit/"]),
    )
    .await;
    mount_page(&mock_server, "/products/1/", "<title>Apple</title>".to_string()).await;
    mount_page(&mock_server, "/products/2/", "<title>Pear</title>".to_string()).await;

    let mut config = create_test_config(&base_url, StrategyName::Crawl, r"/products/\d+/$");
    config.collector.crawl_pattern = Some("/categories/".to_string());

    let mut collector = collector_from_config(&config).unwrap();
    let mut found = Vec::new();
    while let Some(page) = collector.next_match().await.unwrap() {
        found.push((page.url.clone(), page.document.title()));
    }

    assert_eq!(
        found,
        vec![
            (
                format!("{}/products/1/", base_url),
                Some("Apple".to_string())
            ),
            (
                format!("{}/products/2/", base_url),
                Some("Pear".to_string())
            ),
        ]
    );

    // Every page was requested exactly once
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_crawl_skips_failed_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        links(&["/products/1/", "/products/2/"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/products/1/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/products/2/", "<title>Pear</title>".to_string()).await;

    let mut config = create_test_config(&base_url, StrategyName::Crawl, r"/products/\d+/$");
    config.collector.crawl_pattern = Some("/categories/".to_string());

    let mut collector = collector_from_config(&config).unwrap();
    let first = collector.next_match().await.unwrap().unwrap();
    assert_eq!(first.url, format!("{}/products/2/", base_url));
    assert!(collector.next_match().await.unwrap().is_none());
    assert_eq!(collector.stats().pages_failed, 1);
}

#[tokio::test]
async fn test_sitemap_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The index's nested sitemaps are walked before its own leaves
    mount_page(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{}/sitemap-posts.xml", base_url),
            format!("{}/sitemap-missing.xml", base_url),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/sitemap-posts.xml",
        urlset(&[
            format!("{}/posts/1", base_url),
            format!("{}/about", base_url),
            format!("{}/posts/2", base_url),
        ]),
    )
    .await;
    mount_page(&mock_server, "/posts/1", "<title>One</title>".to_string()).await;
    mount_page(&mock_server, "/posts/2", "<title>Two</title>".to_string()).await;

    // The about page never matches and must not be fetched
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, StrategyName::Sitemap, r"/posts/\d+$");
    let mut collector = collector_from_config(&config).unwrap();

    let mut urls = Vec::new();
    while let Some(page) = collector.next_match().await.unwrap() {
        urls.push(page.url);
    }

    assert_eq!(
        urls,
        vec![
            format!("{}/posts/1", base_url),
            format!("{}/posts/2", base_url),
        ]
    );
    assert_eq!(collector.stats().documents_failed, 1);
}

#[tokio::test]
async fn test_robots_txt_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/robots.txt",
        format!(
            "User-agent: *\nDisallow: /private/\n\nSitemap: {0}/sitemap-a.xml\nSitemap: {0}/sitemap-b.xml\n",
            base_url
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/sitemap-a.xml",
        urlset(&[format!("{}/posts/1", base_url)]),
    )
    .await;
    mount_page(
        &mock_server,
        "/sitemap-b.xml",
        urlset(&[
            format!("{}/posts/2", base_url),
            format!("{}/posts/1", base_url),
        ]),
    )
    .await;
    mount_page(&mock_server, "/posts/1", "<title>One</title>".to_string()).await;
    mount_page(&mock_server, "/posts/2", "<title>Two</title>".to_string()).await;

    let config = create_test_config(&base_url, StrategyName::RobotsTxt, r"/posts/\d+$");
    let mut collector = collector_from_config(&config).unwrap();

    let mut urls = Vec::new();
    while let Some(page) = collector.next_match().await.unwrap() {
        urls.push(page.url);
    }

    // Sitemaps in declaration order; the repeated leaf is visited once
    assert_eq!(
        urls,
        vec![
            format!("{}/posts/1", base_url),
            format!("{}/posts/2", base_url),
        ]
    );
    assert_eq!(collector.stats().pages_skipped, 1);
}

#[tokio::test]
async fn test_pulling_one_match_fetches_nothing_beyond_it() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/posts/1", base_url),
            format!("{}/posts/2", base_url),
        ]),
    )
    .await;
    mount_page(&mock_server, "/posts/1", "<title>One</title>".to_string()).await;
    mount_page(&mock_server, "/posts/2", "<title>Two</title>".to_string()).await;

    let config = create_test_config(&base_url, StrategyName::Sitemap, r"/posts/\d+$");
    let mut collector = collector_from_config(&config).unwrap();

    let first = collector.next_match().await.unwrap().unwrap();
    assert_eq!(first.url, format!("{}/posts/1", base_url));

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, vec!["/sitemap.xml", "/posts/1"]);
}

#[tokio::test]
async fn test_runner_writes_json_lines() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/products/1/", base_url),
            format!("{}/products/2/", base_url),
            format!("{}/products/3/", base_url),
        ]),
    )
    .await;
    for (id, name) in [(1, "Apples"), (2, "Pears"), (3, "Plums")] {
        mount_page(
            &mock_server,
            &format!("/products/{}/", id),
            format!(
                r#"<html><body><div class="product-detail">
                <ol><li>Fruit</li></ol>
                <h1>{}</h1>
                <div itemprop="price" content="20.00">
                  <span itemprop="priceCurrency" content="NOK"></span>
                </div>
                <div class="unit-price">kr 40,00 per kg</div>
                </div></body></html>"#,
                name
            ),
        )
        .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("products.jsonl");

    let mut config = create_test_config(&base_url, StrategyName::Sitemap, r"/products/\d+/$");
    config.extractor.kind = ExtractorKind::Product;
    config.output = OutputConfig {
        kind: OutputKind::JsonLines,
        path: Some(out_path.to_string_lossy().into_owned()),
    };

    let collector = collector_from_config(&config).unwrap();
    let extractor = ConfiguredExtractor::from_config(&config.extractor);
    let output = ConfiguredOutput::from_config(&config.output).unwrap();

    let summary = Runner::new(collector, extractor, output)
        .with_limit(2)
        .with_delay(Duration::from_millis(1))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.matches, 2);
    assert_eq!(summary.items, 2);

    let content = std::fs::read_to_string(&out_path).unwrap();
    let names: Vec<String> = content
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["type"], "product");
            assert_eq!(value["unit-price"], 40.0);
            assert!(value["collected-at"].is_string());
            value["name"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(names, vec!["Apples", "Pears"]);

    // The third product was never requested
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/products/3/"));
}
