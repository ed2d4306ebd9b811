//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the static
//! engine through full hunts end-to-end.

use dead_link_hunter::config::{Config, CrawlerConfig, Engine};
use dead_link_hunter::output::{export_results, ExportFormat};
use dead_link_hunter::{Crawler, DeadLinkReport};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a static-engine configuration for tests
fn create_test_config(max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            engine: Engine::Static,
            max_depth,
            max_concurrency: 5,
            fetch_timeout_secs: 1,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
        .collect();

    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", anchors))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn hunt(seed: &str, config: Config) -> DeadLinkReport {
    dead_link_hunter::crawler::hunt(seed, config)
        .await
        .expect("Hunt failed to start")
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/about", "/missing"])).await;
    mount_page(&server, "/about", html_page(&["/team"])).await;
    mount_page(&server, "/team", html_page(&[])).await;
    mount_page(&server, "/missing", ResponseTemplate::new(404)).await;

    let results = hunt(&base_url, create_test_config(5)).await;

    let seed = format!("{}/", base_url);
    assert_eq!(results.len(), 1);

    let page = results.get(&seed).expect("Seed page should have dead links");
    assert_eq!(page.count, 1);
    assert_eq!(page.dead_links, vec![format!("{}/missing", base_url)]);

    for record in results.records() {
        assert!(!record.dead_url.ends_with("/about"));
        assert!(!record.dead_url.ends_with("/team"));
    }
}

#[tokio::test]
async fn test_binary_file_probed_with_head_only() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/files/report.pdf"])).await;

    Mock::given(method("HEAD"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let results = hunt(&base_url, create_test_config(5)).await;

    let page = results.get(&format!("{}/", base_url)).unwrap();
    assert_eq!(page.dead_links, vec![format!("{}/files/report.pdf", base_url)]);
}

#[tokio::test]
async fn test_shared_target_fetched_once() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/a", "/b", "/c"])).await;
    mount_page(&server, "/a", html_page(&["/shared", "/gone"])).await;
    mount_page(&server, "/b", html_page(&["/shared", "/gone"])).await;
    mount_page(&server, "/c", html_page(&["/shared", "/gone"])).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&server)
        .await;

    let results = hunt(&base_url, create_test_config(5)).await;

    // Every page linking to the dead target lists it
    assert_eq!(results.len(), 3);
    for route in ["/a", "/b", "/c"] {
        let page = results.get(&format!("{}{}", base_url, route)).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.dead_links, vec![format!("{}/gone", base_url)]);
    }
}

#[tokio::test]
async fn test_cycle_terminates() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/", "/second"]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(html_page(&["/"]))
        .expect(1)
        .mount(&server)
        .await;

    let results = hunt(&base_url, create_test_config(10)).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/missing", "/about"])).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let results = hunt(&base_url, create_test_config(0)).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_other_domain_never_requested() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let base_url = server.uri();

    let external = format!("{}/missing", other.uri());
    mount_page(&server, "/", html_page(&[external.as_str()])).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&other)
        .await;

    let results = hunt(&base_url, create_test_config(5)).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_dead_seed_recorded_under_empty_referrer() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", ResponseTemplate::new(503)).await;

    let results = hunt(&base_url, create_test_config(5)).await;

    let page = results.get("").expect("Dead seed should be recorded");
    assert_eq!(page.dead_links, vec![format!("{}/", base_url)]);
}

#[tokio::test]
async fn test_timeout_is_not_dead() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/slow"])).await;
    mount_page(
        &server,
        "/slow",
        html_page(&["/missing"]).set_delay(Duration::from_secs(3)),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let mut crawler = Crawler::new(&base_url, create_test_config(5)).await.unwrap();
    crawler.start_hunting().await;

    assert!(crawler.get_results().is_empty());
    let stats = crawler.statistics().unwrap();
    assert_eq!(stats.inconclusive_urls, 1);

    crawler.close().await;
}

#[tokio::test]
async fn test_redirect_to_missing_page_is_dead() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/old"])).await;
    mount_page(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/missing"),
    )
    .await;
    mount_page(&server, "/missing", ResponseTemplate::new(404)).await;

    let results = hunt(&base_url, create_test_config(5)).await;

    let page = results.get(&format!("{}/", base_url)).unwrap();
    assert_eq!(page.dead_links, vec![format!("{}/old", base_url)]);
}

#[tokio::test]
async fn test_hunt_then_export_csv() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/missing"])).await;
    mount_page(&server, "/missing", ResponseTemplate::new(404)).await;

    let results = hunt(&base_url, create_test_config(5)).await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("result");
    let written = export_results(&results, ExportFormat::Csv, base.to_str().unwrap()).unwrap();

    let content = std::fs::read_to_string(written).unwrap();
    let expected = format!(
        "Page,Counts,Dead Links\n{}/,1,{}/missing\n",
        base_url, base_url
    );
    assert_eq!(content, expected);
}
