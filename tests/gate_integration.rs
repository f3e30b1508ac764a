//! Integration tests for the full gate pipeline with Wiremock
//!
//! Both geolocation providers are mock HTTP servers; the document,
//! cache and block renderer are the real adapters.

use geo_gate::{
    BlockList, BlockPageConfig, Bootstrap, CountryGate, CountryResolver, Document, Endpoint,
    GateOutcome, HtmlBlockRenderer, HttpGeoProvider, KeyValueStore, LocationCache,
    MemoryKeyValueStore, ReadyState, ResponseSchema, SystemClock,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CACHE_KEY: &str = "visitor_country_data";

struct Page {
    document: Arc<Document>,
    bootstrap: Bootstrap,
}

fn page_load(
    blocked: &[&str],
    primary: &MockServer,
    fallback: &MockServer,
    store: Arc<MemoryKeyValueStore>,
    ttl_ms: i64,
) -> Page {
    let document = Arc::new(Document::new(ReadyState::Complete, "<p>storefront</p>"));
    let timeout = Duration::from_secs(2);

    let primary = HttpGeoProvider::new(
        "primary",
        Endpoint::new(format!("{}/json/", primary.uri()), ResponseSchema::IpApiCo),
        timeout,
    )
    .unwrap();
    let fallback = HttpGeoProvider::new(
        "fallback",
        Endpoint::new(format!("{}/json/", fallback.uri()), ResponseSchema::IpApiCom),
        timeout,
    )
    .unwrap();

    let cache = LocationCache::new(store, Arc::new(SystemClock), CACHE_KEY, ttl_ms);
    let resolver = CountryResolver::new(cache, Arc::new(primary), Arc::new(fallback));
    let renderer = Arc::new(HtmlBlockRenderer::new(
        BlockPageConfig::default(),
        document.clone(),
    ));
    let gate = Arc::new(CountryGate::new(BlockList::new(blocked), resolver, renderer));

    Page {
        bootstrap: Bootstrap::new(gate, document.clone()),
        document,
    }
}

async fn mount_json(server: &MockServer, status: u16, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Blocklist {CN, RU}, primary answers "cn": page is replaced and halted.
#[tokio::test]
async fn test_primary_hit_blocks_listed_country() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    mount_json(&primary, 200, serde_json::json!({"country_code": "cn"}), 1).await;
    mount_json(&fallback, 200, serde_json::json!({"countryCode": "US"}), 0).await;

    let page = page_load(
        &["CN", "RU"],
        &primary,
        &fallback,
        Arc::new(MemoryKeyValueStore::new()),
        86_400_000,
    );

    let outcome = page.bootstrap.run().await;

    assert!(matches!(outcome, GateOutcome::Blocked { ref country } if country.as_str() == "CN"));
    assert!(page.document.is_halted());
    assert!(page.document.content().contains("Detected Location: CN"));
    assert!(!page.document.content().contains("storefront"));
}

/// Blocklist {CN}, primary errors, fallback answers "US": page allowed.
#[tokio::test]
async fn test_fallback_hit_allows_unlisted_country() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&primary)
        .await;
    mount_json(
        &fallback,
        200,
        serde_json::json!({"status": "success", "countryCode": "US"}),
        1,
    )
    .await;

    let page = page_load(
        &["CN"],
        &primary,
        &fallback,
        Arc::new(MemoryKeyValueStore::new()),
        86_400_000,
    );

    let outcome = page.bootstrap.run().await;

    assert!(matches!(outcome, GateOutcome::Allowed { country: Some(ref c) } if c.as_str() == "US"));
    assert!(!page.document.is_halted());
    assert_eq!(page.document.content(), "<p>storefront</p>");
}

/// Blocklist {KP}, both providers fail: page allowed, nothing escapes.
#[tokio::test]
async fn test_both_providers_fail_open() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    mount_json(&primary, 200, serde_json::json!({"error": true, "reason": "RateLimited"}), 1).await;
    mount_json(
        &fallback,
        200,
        serde_json::json!({"status": "fail", "message": "quota"}),
        1,
    )
    .await;

    let store = Arc::new(MemoryKeyValueStore::new());
    let page = page_load(&["KP"], &primary, &fallback, store.clone(), 86_400_000);

    let outcome = page.bootstrap.run().await;

    assert_eq!(outcome, GateOutcome::AllowedOnFailure);
    assert!(!page.document.is_halted());
    assert!(store.is_empty());
}

/// A fallback answer is cached; the next page load makes no network call.
#[tokio::test]
async fn test_cached_country_reused_across_page_loads() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&primary)
        .await;
    mount_json(&fallback, 200, serde_json::json!({"countryCode": "ru"}), 1).await;

    let store = Arc::new(MemoryKeyValueStore::new());

    let first = page_load(&["RU"], &primary, &fallback, store.clone(), 86_400_000);
    assert!(first.bootstrap.run().await.is_blocked());

    let second = page_load(&["RU"], &primary, &fallback, store.clone(), 86_400_000);
    assert!(second.bootstrap.run().await.is_blocked());
    assert!(second.document.is_halted());

    let raw = store.get(CACHE_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["countryCode"], "RU");
    assert!(json["timestamp"].as_i64().unwrap() > 0);
}

/// An expired record is purged and a fresh lookup happens.
#[tokio::test]
async fn test_expired_cache_refreshes() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    mount_json(&primary, 200, serde_json::json!({"country_code": "JP"}), 1).await;
    mount_json(&fallback, 200, serde_json::json!({"countryCode": "JP"}), 0).await;

    let store = Arc::new(MemoryKeyValueStore::new());
    store
        .set(CACHE_KEY, r#"{"countryCode":"CN","timestamp":0}"#)
        .await
        .unwrap();

    let page = page_load(&["CN"], &primary, &fallback, store.clone(), 60_000);
    let outcome = page.bootstrap.run().await;

    assert!(matches!(outcome, GateOutcome::Allowed { country: Some(ref c) } if c.as_str() == "JP"));
    let raw = store.get(CACHE_KEY).await.unwrap().unwrap();
    assert!(raw.contains("\"JP\""));
}

/// Empty blocklist: providers are never called.
#[tokio::test]
async fn test_empty_blocklist_makes_no_calls() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    mount_json(&primary, 200, serde_json::json!({"country_code": "CN"}), 0).await;
    mount_json(&fallback, 200, serde_json::json!({"countryCode": "CN"}), 0).await;

    let page = page_load(
        &[],
        &primary,
        &fallback,
        Arc::new(MemoryKeyValueStore::new()),
        86_400_000,
    );

    assert_eq!(
        page.bootstrap.run().await,
        GateOutcome::Allowed { country: None }
    );
    assert!(!page.document.is_halted());
}

/// A hanging primary is cut off by the timeout and the fallback answers.
#[tokio::test]
async fn test_hanging_primary_times_out_to_fallback() {
    let primary = MockServer::start().await;
    let fallback = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"country_code": "CN"}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&primary)
        .await;
    mount_json(&fallback, 200, serde_json::json!({"countryCode": "CN"}), 1).await;

    let page = page_load(
        &["CN"],
        &primary,
        &fallback,
        Arc::new(MemoryKeyValueStore::new()),
        86_400_000,
    );

    let outcome = tokio::time::timeout(Duration::from_secs(8), page.bootstrap.run())
        .await
        .expect("provider timeout should bound the pipeline");

    assert!(outcome.is_blocked());
}
