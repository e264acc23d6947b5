//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock forum servers and test
//! page-count resolution, page crawling and the multi-thread run end-to-end.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thread_harvest::config::{Config, HeadersConfig, OutputConfig};
use thread_harvest::crawler::{build_http_client, run_harvest};
use thread_harvest::output::ThreadOutcome;
use thread_harvest::{FixedDelay, HarvestError, Harvester, NoDelay, Pacer, PageCount, ThreadRef};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const USER_AGENT: &str = "TestAgent/1.0";

fn test_headers() -> HeadersConfig {
    HeadersConfig {
        user_agent: USER_AGENT.to_string(),
    }
}

fn harvester() -> Harvester {
    Harvester::from_headers(&test_headers(), NoDelay).expect("Failed to build harvester")
}

fn thread_ref(server: &MockServer, thread_path: &str) -> ThreadRef {
    ThreadRef::parse(&format!("{}{}", server.uri(), thread_path)).expect("Invalid thread URL")
}

/// Renders a thread page with the given title and entries
fn thread_page(title: Option<&str>, entries: &[&str]) -> String {
    let heading = title
        .map(|t| format!(r#"<h1 id="title" data-id="1"><a href="/t">{}</a></h1>"#, t))
        .unwrap_or_default();
    let items: String = entries
        .iter()
        .map(|e| format!("<li><div class=\"content\">\n  {}\n</div></li>", e))
        .collect();

    format!(
        r#"<html><head><title>forum</title></head><body>{}<ul id="entry-item-list">{}</ul></body></html>"#,
        heading, items
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Matches requests without a query string, i.e. the bare thread URL
fn bare(request: &Request) -> bool {
    request.url.query().is_none()
}

/// Mounts the bare first page answering the page-count request
async fn mount_first_page(server: &MockServer, thread_path: &str, pager: &str) {
    Mock::given(method("GET"))
        .and(path(thread_path))
        .and(bare)
        .respond_with(html(format!(
            r#"<html><body>{}<ul><li><div class="content">first</div></li></ul></body></html>"#,
            pager
        )))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts one numbered page, expected to be fetched exactly once
async fn mount_page(server: &MockServer, thread_path: &str, index: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(thread_path))
        .and(query_param("p", index.to_string()))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Pacer that records how often it was asked to pause
#[derive(Clone, Default)]
struct CountingPacer {
    pauses: Arc<AtomicUsize>,
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }

    fn delay(&self) -> Duration {
        Duration::ZERO
    }
}

#[tokio::test]
async fn test_page_count_takes_last_pager_number() {
    let server = MockServer::start().await;
    mount_first_page(&server, "/thread--1", r#"<div class="pager">1 2 3 45</div>"#).await;

    let count = harvester()
        .resolve_page_count(&thread_ref(&server, "/thread--1"))
        .await
        .expect("Resolution failed");

    assert_eq!(count.get(), 45);
}

#[tokio::test]
async fn test_page_count_reads_pagecount_attribute() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        "/thread--1",
        r#"<div class="pager" data-currentpage="1" data-pagecount="7"></div>"#,
    )
    .await;

    let count = harvester()
        .resolve_page_count(&thread_ref(&server, "/thread--1"))
        .await
        .expect("Resolution failed");

    assert_eq!(count.get(), 7);
}

#[tokio::test]
async fn test_page_count_defaults_to_one_without_pager() {
    let server = MockServer::start().await;
    mount_first_page(&server, "/thread--1", "").await;

    let count = harvester()
        .resolve_page_count(&thread_ref(&server, "/thread--1"))
        .await
        .expect("Resolution failed");

    assert_eq!(count, PageCount::ONE);
}

#[tokio::test]
async fn test_page_count_request_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread--1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = harvester()
        .resolve_page_count(&thread_ref(&server, "/thread--1"))
        .await;

    assert!(matches!(result, Err(HarvestError::Status { .. })));
}

#[tokio::test]
async fn test_entries_keep_page_then_document_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/thread--1", 1, thread_page(Some("Topic"), &["A", "B"])).await;
    mount_page(&server, "/thread--1", 2, thread_page(Some("Topic"), &["C"])).await;

    let collection = harvester()
        .crawl_entries(
            &thread_ref(&server, "/thread--1"),
            PageCount::new(2).unwrap(),
        )
        .await
        .expect("Crawl failed");

    assert_eq!(collection.entries, vec!["A", "B", "C"]);
    assert_eq!(collection.pages_fetched, 2);
}

#[tokio::test]
async fn test_title_comes_from_last_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/thread--1", 1, thread_page(None, &["A"])).await;
    mount_page(&server, "/thread--1", 2, thread_page(Some("Final Title"), &["B"])).await;

    let collection = harvester()
        .crawl_entries(
            &thread_ref(&server, "/thread--1"),
            PageCount::new(2).unwrap(),
        )
        .await
        .expect("Crawl failed");

    assert_eq!(collection.title, "Final Title");
}

#[tokio::test]
async fn test_title_differs_between_pages() {
    let server = MockServer::start().await;
    mount_page(&server, "/thread--1", 1, thread_page(Some("First"), &["A"])).await;
    mount_page(&server, "/thread--1", 2, thread_page(Some("Second"), &["B"])).await;

    let collection = harvester()
        .crawl_entries(
            &thread_ref(&server, "/thread--1"),
            PageCount::new(2).unwrap(),
        )
        .await
        .expect("Crawl failed");

    assert_eq!(collection.title, "Second");
}

#[tokio::test]
async fn test_missing_title_on_last_page_fails() {
    let server = MockServer::start().await;
    mount_page(&server, "/thread--1", 1, thread_page(Some("Only Here"), &["A"])).await;
    mount_page(&server, "/thread--1", 2, thread_page(None, &["B"])).await;

    let result = harvester()
        .crawl_entries(
            &thread_ref(&server, "/thread--1"),
            PageCount::new(2).unwrap(),
        )
        .await;

    match result {
        Err(HarvestError::MissingTitle { url }) => assert!(url.ends_with("/thread--1?p=2")),
        other => panic!("Expected MissingTitle, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_page_aborts_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/thread--1", 1, thread_page(Some("T"), &["A"])).await;
    Mock::given(method("GET"))
        .and(path("/thread--1"))
        .and(query_param("p", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    // No page after the failing one is requested
    Mock::given(method("GET"))
        .and(path("/thread--1"))
        .and(query_param("p", "3"))
        .respond_with(html(thread_page(Some("T"), &["C"])))
        .expect(0)
        .mount(&server)
        .await;

    let result = harvester()
        .crawl_entries(
            &thread_ref(&server, "/thread--1"),
            PageCount::new(3).unwrap(),
        )
        .await;

    match result {
        Err(HarvestError::Status { url, status }) => {
            assert!(url.ends_with("?p=2"));
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_harvest_issues_one_request_per_page() {
    let server = MockServer::start().await;
    mount_first_page(&server, "/thread--9", r#"<div class="pager">1 2 3</div>"#).await;
    for index in 1..=3 {
        let entry = format!("entry {}", index);
        mount_page(
            &server,
            "/thread--9",
            index,
            thread_page(Some("Counted"), &[entry.as_str()]),
        )
        .await;
    }

    let collection = harvester()
        .harvest(&thread_ref(&server, "/thread--9"))
        .await
        .expect("Harvest failed");

    assert_eq!(collection.entries, vec!["entry 1", "entry 2", "entry 3"]);
    assert_eq!(collection.pages_fetched, 3);

    let requests = server.received_requests().await.expect("Recording disabled");
    let page_requests = requests
        .iter()
        .filter(|r| r.url.query().is_some())
        .count();
    assert_eq!(page_requests, 3);
}

#[tokio::test]
async fn test_pause_after_every_page() {
    let server = MockServer::start().await;
    for index in 1..=3 {
        mount_page(&server, "/thread--1", index, thread_page(Some("T"), &["x"])).await;
    }

    let pacer = CountingPacer::default();
    let harvester = Harvester::new(
        build_http_client(&test_headers()).unwrap(),
        pacer.clone(),
    );

    harvester
        .crawl_entries(
            &thread_ref(&server, "/thread--1"),
            PageCount::new(3).unwrap(),
        )
        .await
        .expect("Crawl failed");

    assert_eq!(pacer.pauses.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_single_page_still_waits() {
    let server = MockServer::start().await;
    mount_page(&server, "/thread--1", 1, thread_page(Some("T"), &["x"])).await;

    let delay = FixedDelay::from_secs_f64(0.01).unwrap();
    let harvester = Harvester::from_headers(&test_headers(), delay).unwrap();

    let start = Instant::now();
    harvester
        .crawl_entries(&thread_ref(&server, "/thread--1"), PageCount::ONE)
        .await
        .expect("Crawl failed");

    assert!(start.elapsed() >= Duration::from_millis(10));
}

#[tokio::test]
async fn test_user_agent_sent_on_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread--1"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(html(thread_page(Some("T"), &["x"])))
        .expect(2)
        .mount(&server)
        .await;

    let collection = harvester()
        .harvest(&thread_ref(&server, "/thread--1"))
        .await
        .expect("Harvest failed");

    assert_eq!(collection.entries, vec!["x"]);
}

#[tokio::test]
async fn test_run_harvest_writes_one_file_per_thread() {
    let server = MockServer::start().await;

    // Two-page thread
    mount_first_page(&server, "/good--1", r#"<div class="pager">1 2</div>"#).await;
    mount_page(&server, "/good--1", 1, thread_page(Some("Good"), &["A", "B"])).await;
    mount_page(&server, "/good--1", 2, thread_page(Some("Good"), &["C \"quoted\""])).await;

    // Thread whose only page fails
    mount_first_page(&server, "/bad--2", "").await;
    Mock::given(method("GET"))
        .and(path("/bad--2"))
        .and(query_param("p", "1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut threads = toml::Table::new();
    threads.insert(
        "good".to_string(),
        toml::Value::String(format!("{}/good--1", server.uri())),
    );
    threads.insert(
        "bad".to_string(),
        toml::Value::String(format!("{}/bad--2", server.uri())),
    );

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let output_dir = output.path().join("nested");
    let config = Config {
        threads,
        headers: test_headers(),
        output: OutputConfig {
            directory: output_dir.display().to_string(),
        },
    };

    let report = run_harvest(&config, &harvester(), &output_dir)
        .await
        .expect("Run failed");

    assert_eq!(report.threads.len(), 2);
    assert_eq!(report.threads[0].label, "good");
    assert_eq!(report.threads[1].label, "bad");
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.total_entries(), 3);

    match &report.threads[0].outcome {
        ThreadOutcome::Written { path, pages, .. } => {
            assert_eq!(*pages, 2);
            let csv = std::fs::read_to_string(path).expect("CSV missing");
            assert_eq!(csv, "\"Good\"\n\"A\"\n\"B\"\n\"C \"\"quoted\"\"\"\n");
        }
        other => panic!("Expected Written, got {:?}", other),
    }

    assert!(matches!(
        report.threads[1].outcome,
        ThreadOutcome::Failed { .. }
    ));
    assert!(!output_dir.join("bad.csv").exists());
}
