//! geoGate - country access gate
//!
//! Composition root: gates the page given as the first argument (or a
//! placeholder page) and prints the resulting document to stdout.

use geo_gate::domain::ports::{GeoProvider, KeyValueStore};
use geo_gate::{
    load_config, Bootstrap, CountryGate, CountryResolver, Document, HtmlBlockRenderer,
    HttpGeoProvider, LocationCache, MemoryKeyValueStore, ReadyState, SqliteKeyValueStore,
    SystemClock,
};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

const PLACEHOLDER_PAGE: &str = "<!DOCTYPE html><html><body><p>Welcome</p></body></html>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "starting geoGate blocked={} cache_ttl_ms={}",
        cfg.blocked_countries,
        cfg.cache_ttl_ms
    );

    let page = match std::env::args().nth(1) {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => PLACEHOLDER_PAGE.to_string(),
    };

    // ===== COMPOSITION ROOT =====

    let document = Arc::new(Document::new(ReadyState::Loading, page));

    let store: Arc<dyn KeyValueStore> = match &cfg.cache_path {
        Some(path) => match SqliteKeyValueStore::open(path) {
            Ok(s) => {
                tracing::info!("location cache opened at {}", path);
                Arc::new(s) as Arc<dyn KeyValueStore>
            }
            Err(e) => {
                tracing::error!("failed to open location cache at {}: {:?}", path, e);
                Arc::new(MemoryKeyValueStore::new()) as Arc<dyn KeyValueStore>
            }
        },
        None => Arc::new(MemoryKeyValueStore::new()) as Arc<dyn KeyValueStore>,
    };

    let cache = LocationCache::new(
        store,
        Arc::new(SystemClock),
        cfg.cache_key.clone(),
        cfg.cache_ttl_ms,
    );

    let primary: Arc<dyn GeoProvider> = Arc::new(HttpGeoProvider::new(
        "primary",
        cfg.providers.primary.clone(),
        cfg.provider_timeout,
    )?);
    let fallback: Arc<dyn GeoProvider> = Arc::new(HttpGeoProvider::new(
        "fallback",
        cfg.providers.fallback.clone(),
        cfg.provider_timeout,
    )?);

    let renderer = Arc::new(HtmlBlockRenderer::new(cfg.block_page.clone(), document.clone()));
    let resolver = CountryResolver::new(cache, primary, fallback);
    let gate = Arc::new(CountryGate::new(cfg.blocked_countries.clone(), resolver, renderer));

    let bootstrap = Arc::new(Bootstrap::new(gate, document.clone()));
    let pending = bootstrap.spawn();

    // The host finished parsing the page.
    document.set_ready_state(ReadyState::Interactive);

    let outcome = pending.await?;
    tracing::info!("gate finished: {:?}", outcome);

    println!("{}", document.content());
    Ok(())
}
