use std::time::Duration;

use dw_core::Error;
use dw_feed::{FeedEndpoint, FeedLoader, LoaderConfig};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests carrying the cache-busting query parameter.
struct HasNoCache;

impl Match for HasNoCache {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(key, _)| key == "nocache")
    }
}

fn endpoint(page: &str, feed_path: &str) -> FeedEndpoint {
    FeedEndpoint::new(Url::parse(page).unwrap(), feed_path)
}

#[tokio::test]
async fn loads_articles_over_http() {
    let server = MockServer::start().await;
    let body = r#"{
        "last_updated": "2025-06-01T08:00:00Z",
        "items": [
            {"titolo": "Notion per i team", "fonte": "DW", "data": "2025-06-02T09:00:00Z"},
            {"titolo": "Canva novità"}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/data/articoli.json"))
        .and(header("cache-control", "no-cache"))
        .and(header(
            "user-agent",
            "DigitalWorkflowBot/1.0 (+https://fugallo.it/)",
        ))
        .and(HasNoCache)
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let loader = FeedLoader::new(&LoaderConfig::default()).unwrap();
    let feed = loader
        .load(&endpoint(&server.uri(), "data/articoli.json"))
        .await
        .unwrap();

    assert_eq!(feed.articles.len(), 2);
    assert_eq!(feed.articles[0].title_text(), "Notion per i team");
    assert_eq!(
        feed.articles[1].published.as_deref(),
        Some("2025-06-01T08:00:00Z")
    );
}

#[tokio::test]
async fn falls_back_when_the_root_copy_is_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/ia.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blog/data/ia.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"[{"title": "Mirrored copy"}]"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let loader = FeedLoader::new(&LoaderConfig::default()).unwrap();
    let page = format!("{}/blog/", server.uri());
    let feed = loader.load(&endpoint(&page, "data/ia.json")).await.unwrap();

    assert_eq!(feed.articles.len(), 1);
    assert_eq!(feed.articles[0].title_text(), "Mirrored copy");
}

#[tokio::test]
async fn surfaces_the_final_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = FeedLoader::new(&LoaderConfig::default()).unwrap();
    let err = loader
        .load(&endpoint(&server.uri(), "data/articoli.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 500, .. }));
}

#[tokio::test]
async fn unknown_shape_resolves_to_an_empty_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("true", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let loader = FeedLoader::new(&LoaderConfig::default()).unwrap();
    let feed = loader
        .load(&endpoint(&server.uri(), "data/articoli.json"))
        .await
        .unwrap();

    assert!(feed.articles.is_empty());
}

#[tokio::test]
async fn slow_responses_hit_the_configured_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("[]", "application/json")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = LoaderConfig {
        timeout: Duration::from_millis(50),
        ..LoaderConfig::default()
    };
    let loader = FeedLoader::new(&config).unwrap();
    let err = loader
        .load(&endpoint(&server.uri(), "data/articoli.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}
