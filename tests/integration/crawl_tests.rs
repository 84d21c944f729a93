//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sci_worm::config::{Config, CrawlerConfig, HttpConfig};
use sci_worm::crawler::{build_http_client, run_crawl, Crawler, KeywordHit};
use sci_worm::state::{CrawlState, StopReason};
use sci_worm::{ConfigError, WormError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from the given seeds
fn create_test_config(seeds: Vec<String>, keywords: Vec<&str>, visit_limit: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            seeds,
            keywords: keywords.into_iter().map(String::from).collect(),
            visit_limit,
            timeout_secs: 2,
        },
        http: HttpConfig::default(),
        citeulike: Default::default(),
        scholar: Default::default(),
        reference: None,
    }
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a small site:
///
/// ```text
/// /  -> /a, /b
/// /a -> /b, /c, /
/// /b -> /a          (mentions "merger")
/// /c -> 404
/// ```
async fn mount_site(server: &MockServer) {
    let base = server.uri();

    mount_page(
        server,
        "/",
        format!(
            r#"<html><body><a href="{base}/a">A</a> <a href="/b">B</a></body></html>"#
        ),
    )
    .await;

    mount_page(
        server,
        "/a",
        r#"<html><body><a href="/b">B</a><a href="c">C</a><a href="/">Home</a></body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        server,
        "/b",
        r#"<html><body><p>A merger was announced.</p><a href="/a">A</a></body></html>"#
            .to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<html><body><a href="/hidden">Hidden</a></body></html>"#),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_breadth_first() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    let config = create_test_config(vec![format!("{}/", base)], vec!["merger"], 100);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(
        report.visited,
        vec![
            format!("{}/", base),
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base),
        ]
    );
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);

    // /b was queued twice (from / and from /a) but fetched once
    assert_eq!(report.pages_fetched, 4);
}

#[tokio::test]
async fn test_keyword_hits_are_bookmarked() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    let config = create_test_config(
        vec![format!("{}/", base)],
        vec!["merger", "announced", "acquisition"],
        100,
    );
    let report = run_crawl(&config).await.expect("Crawl failed");

    let page_b = format!("{}/b", base);
    assert_eq!(report.urls_of_interest, vec![page_b.clone()]);
    assert_eq!(
        report.keyword_hits,
        vec![
            KeywordHit {
                keyword: "merger".to_string(),
                url: page_b.clone(),
            },
            KeywordHit {
                keyword: "announced".to_string(),
                url: page_b,
            },
        ]
    );
}

#[tokio::test]
async fn test_visit_limit_stops_crawl() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    let config = create_test_config(vec![format!("{}/", base)], vec![], 2);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(
        report.visited,
        vec![format!("{}/", base), format!("{}/a", base)]
    );
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.stop_reason, StopReason::VisitLimitReached);
}

#[tokio::test]
async fn test_failed_pages_count_as_visited() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    // Nothing listens on the discard port
    let unreachable = "http://127.0.0.1:9/".to_string();
    let config = create_test_config(vec![unreachable.clone(), format!("{}/c", base)], vec![], 100);
    let report = run_crawl(&config).await.expect("Crawl failed");

    // Neither page yields content, so nothing is followed from the 404 body
    assert_eq!(report.visited, vec![unreachable, format!("{}/c", base)]);
    assert_eq!(report.pages_fetched, 2);
    assert!(report.urls_of_interest.is_empty());
}

#[tokio::test]
async fn test_links_back_to_seed_are_not_refetched() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    let config = create_test_config(vec![format!("{}/", base)], vec![], 100);
    run_crawl(&config).await.expect("Crawl failed");

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let home_fetches = requests.iter().filter(|r| r.url.path() == "/").count();
    assert_eq!(home_fetches, 1);
}

#[tokio::test]
async fn test_seed_without_trailing_slash_is_fetched_once() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(r#"<a href="{base}">Self</a> <a href="/">Root</a> <a href="/b">B</a>"#),
    )
    .await;
    mount_page(&mock_server, "/b", format!(r#"<a href="{base}/">Home</a>"#)).await;

    // The server URI has no trailing slash; links to the root carry one
    let config = create_test_config(vec![base.clone()], vec![], 100);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.visited, vec![base.clone(), format!("{}/b", base)]);
    assert_eq!(report.pages_fetched, 2);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let home_fetches = requests.iter().filter(|r| r.url.path() == "/").count();
    assert_eq!(home_fetches, 1);
}

#[tokio::test]
async fn test_crawl_without_seeds_is_rejected() {
    let config = create_test_config(vec![], vec!["merger"], 100);
    let result = run_crawl(&config).await;

    assert!(matches!(
        result,
        Err(WormError::Config(ConfigError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_visited_has_no_duplicates() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    // Duplicate seed on purpose
    let seed = format!("{}/", base);
    let config = create_test_config(vec![seed.clone(), seed], vec![], 100);
    let report = run_crawl(&config).await.expect("Crawl failed");

    let mut unique = report.visited.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), report.visited.len());
    assert_eq!(report.pages_fetched, report.visited.len());
}

#[tokio::test]
async fn test_step_by_step_progress() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base = mock_server.uri();

    let client = build_http_client(&HttpConfig::default(), Duration::from_secs(2))
        .expect("Failed to build client");
    let mut crawler = Crawler::with_client(
        client,
        &[format!("{}/", base)],
        vec!["merger".to_string()],
        100,
    );

    assert_eq!(crawler.step().await, CrawlState::Running);
    assert_eq!(crawler.frontier().visited_count(), 1);
    assert_eq!(crawler.frontier().pending_count(), 2);

    assert_eq!(crawler.step().await, CrawlState::Running);
    assert_eq!(crawler.frontier().visited_count(), 2);
    // /b again and /c; the link home is already visited
    assert_eq!(crawler.frontier().pending_count(), 3);

    assert_eq!(crawler.step().await, CrawlState::Running);
    assert_eq!(crawler.keyword_hits().len(), 1);

    let mut steps = 0;
    while crawler.step().await == CrawlState::Running {
        steps += 1;
        assert!(steps < 10, "crawl did not terminate");
    }
    assert_eq!(crawler.state(), CrawlState::Done);
    assert_eq!(crawler.step().await, CrawlState::Done);
}
