//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end, writing articles into a temporary directory.

use std::path::Path;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiki_trawl::config::Config;
use wiki_trawl::crawler::run_crawl;
use wiki_trawl::storage::read_mapping;
use wiki_trawl::StopReason;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `/wiki/` on the mock server
fn create_test_config(base_url: &str, seed_path: &str, max_articles: usize, dir: &Path) -> Config {
    let toml = format!(
        r#"
[crawler]
seed-url = "{base}{seed}"
max-articles = {max}
delay-seconds = 0.0
request-timeout-seconds = 5

[scope]
domain = "127.0.0.1"
path-prefix = "/wiki/"

[filter]
include-suffix = "(Civ5)"
exclude-suffix = "/Civilopedia"

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"

[output]
directory = "{dir}"
"#,
        base = base_url,
        seed = seed_path,
        max = max_articles,
        dir = dir.display()
    );

    let config: Config = toml::from_str(&toml).expect("Failed to parse test config");
    wiki_trawl::config::validate(&config).expect("Test config should be valid");
    config
}

/// Mounts an HTML page that links to `links`
async fn mount_page(server: &MockServer, page_path: &str, links: &[&str], expected_hits: u64) {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">{}</a>"#, l, l))
        .collect();

    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    "<html><head><title>{}</title></head><body>{}</body></html>",
                    page_path, anchors
                ))
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_saves_articles_and_logs() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let out = TempDir::new().unwrap();

    mount_page(
        &server,
        "/wiki/Main",
        &[
            "/wiki/Rome_(Civ5)",
            "Babylon_(Civ5)",
            "/wiki/Rome_(Civ5)#History",
            "/wiki/Rome_(Civ5)/Civilopedia",
            "/forum/Off_topic_(Civ5)",
            "https://elsewhere.example/wiki/Greece_(Civ5)",
        ],
        1,
    )
    .await;
    mount_page(&server, "/wiki/Rome_(Civ5)", &["/wiki/Main"], 1).await;
    mount_page(&server, "/wiki/Babylon_(Civ5)", &["/wiki/Rome_(Civ5)"], 1).await;
    mount_page(&server, "/wiki/Rome_(Civ5)/Civilopedia", &[], 1).await;
    mount_page(&server, "/forum/Off_topic_(Civ5)", &[], 0).await;

    let config = create_test_config(&base_url, "/wiki/Main", 10, out.path());
    let report = run_crawl(&config, Some("testhash".to_string()), &CancellationToken::new())
        .await
        .expect("Crawl should start");

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.state.fetched_count, 4);
    assert_eq!(report.state.visited_count, 4);
    assert_eq!(report.state.failed_count, 0);
    assert_eq!(report.state.saved_count, 2);

    // Default strip suffix turns Rome_(Civ5) into Rome
    let rome = std::fs::read_to_string(out.path().join("Rome.html")).unwrap();
    assert!(rome.contains("/wiki/Main"));
    assert!(out.path().join("Babylon.html").exists());
    assert!(!out.path().join("Civilopedia.html").exists());

    let mapping = read_mapping(&out.path().join("url_mapping.txt")).unwrap();
    let pairs: Vec<(String, String)> = mapping
        .into_iter()
        .map(|r| (r.storage_key, r.url))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Rome".to_string(), format!("{}/wiki/Rome_(Civ5)", base_url)),
            ("Babylon".to_string(), format!("{}/wiki/Babylon_(Civ5)", base_url)),
        ]
    );

    let log = std::fs::read_to_string(out.path().join("crawl_log.txt")).unwrap();
    assert!(log.contains(&format!("Starting URL: {}/wiki/Main", base_url)));
    assert!(log.contains("Config hash: testhash"));
    assert!(log.contains(&format!("Saved: {}/wiki/Rome_(Civ5)", base_url)));
    assert!(log.contains("Stop reason: frontier_exhausted"));
    assert!(log.contains("Saved articles: 2"));
}

#[tokio::test]
async fn test_cap_stops_crawl_in_breadth_first_order() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let out = TempDir::new().unwrap();

    mount_page(
        &server,
        "/wiki/Main",
        &[
            "/wiki/A_(Civ5)",
            "/wiki/B_(Civ5)/Civilopedia",
            "/wiki/C_(Civ5)",
            "/wiki/D_(Civ5)",
        ],
        1,
    )
    .await;
    mount_page(&server, "/wiki/A_(Civ5)", &[], 1).await;
    mount_page(&server, "/wiki/B_(Civ5)/Civilopedia", &[], 1).await;
    mount_page(&server, "/wiki/C_(Civ5)", &[], 1).await;
    // Queued but never fetched once the cap is hit
    mount_page(&server, "/wiki/D_(Civ5)", &[], 0).await;

    let config = create_test_config(&base_url, "/wiki/Main", 2, out.path());
    let report = run_crawl(&config, None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stop_reason, StopReason::CapReached);
    assert_eq!(report.state.saved_count, 2);
    assert_eq!(report.state.visited_count, 5);
    assert_eq!(report.frontier_remaining, 1);

    let keys: Vec<String> = report.saved.iter().map(|s| s.storage_key.clone()).collect();
    assert_eq!(keys, vec!["A", "C"]);
    assert!(!out.path().join("D.html").exists());
}

#[tokio::test]
async fn test_server_error_is_skipped() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let out = TempDir::new().unwrap();

    mount_page(
        &server,
        "/wiki/Main",
        &["/wiki/Broken_(Civ5)", "/wiki/Fine_(Civ5)"],
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Broken_(Civ5)"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/wiki/Fine_(Civ5)", &[], 1).await;

    let config = create_test_config(&base_url, "/wiki/Main", 10, out.path());
    let report = run_crawl(&config, None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert!(report.is_success());
    assert_eq!(report.state.failed_count, 1);
    assert_eq!(report.state.saved_count, 1);
    assert!(out.path().join("Fine.html").exists());

    let log = std::fs::read_to_string(out.path().join("crawl_log.txt")).unwrap();
    assert!(log.contains(&format!("Error: {}/wiki/Broken_(Civ5) - HTTP 500", base_url)));
}

#[tokio::test]
async fn test_links_resolved_against_redirect_target() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/wiki/Start"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/wiki/section/Index", base_url).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    // Relative link must resolve under /wiki/section/
    mount_page(&server, "/wiki/section/Index", &["Lua_(Civ5)"], 1).await;
    mount_page(&server, "/wiki/section/Lua_(Civ5)", &[], 1).await;

    let config = create_test_config(&base_url, "/wiki/Start", 10, out.path());
    let report = run_crawl(&config, None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.state.saved_count, 1);
    assert!(out.path().join("Lua.html").exists());
}

#[tokio::test]
async fn test_cancelled_crawl_fetches_nothing() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let out = TempDir::new().unwrap();

    mount_page(&server, "/wiki/Main", &["/wiki/A_(Civ5)"], 0).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let config = create_test_config(&base_url, "/wiki/Main", 10, out.path());
    let report = run_crawl(&config, None, &cancel).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::Interrupted);
    assert_eq!(report.state.fetched_count, 0);

    // Mapping log exists but is empty
    let mapping = read_mapping(&out.path().join("url_mapping.txt")).unwrap();
    assert!(mapping.is_empty());
}
