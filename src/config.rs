use crate::adapters::outbound::{BlockPageConfig, Endpoint, ResponseSchema, DEFAULT_PROVIDER_TIMEOUT};
use crate::domain::services::DEFAULT_CACHE_KEY;
use crate::domain::value_objects::BlockList;
use std::time::Duration;

pub const DEFAULT_BLOCKED_COUNTRIES: &str = "CN,RU,KP,IN,VN,ID,MY,TH,PH";
pub const DEFAULT_CACHE_TTL_MS: i64 = 86_400_000;
pub const DEFAULT_PRIMARY_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_FALLBACK_URL: &str = "https://ip-api.com/json/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Providers {
    pub primary: Endpoint,
    pub fallback: Endpoint,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            primary: Endpoint::new(DEFAULT_PRIMARY_URL, ResponseSchema::IpApiCo),
            fallback: Endpoint::new(DEFAULT_FALLBACK_URL, ResponseSchema::IpApiCom),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub blocked_countries: BlockList,
    /// Cache lifetime; zero or negative disables caching
    pub cache_ttl_ms: i64,
    pub cache_key: String,
    /// SQLite file for the cache; in-memory when unset
    pub cache_path: Option<String>,
    pub providers: Providers,
    pub provider_timeout: Duration,
    pub block_page: BlockPageConfig,
    pub debug: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            blocked_countries: BlockList::from_csv(DEFAULT_BLOCKED_COUNTRIES),
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_path: None,
            providers: Providers::default(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            block_page: BlockPageConfig::default(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} provider URL must start with http:// or https://: {url:?}")]
    InvalidProviderUrl { name: &'static str, url: String },

    #[error("cache_key cannot be empty")]
    EmptyCacheKey,

    #[error("provider timeout must be greater than 0")]
    ZeroProviderTimeout,
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, endpoint) in [
            ("primary", &self.providers.primary),
            ("fallback", &self.providers.fallback),
        ] {
            if !endpoint.url.starts_with("http://") && !endpoint.url.starts_with("https://") {
                return Err(ConfigError::InvalidProviderUrl {
                    name,
                    url: endpoint.url.clone(),
                });
            }
        }
        if self.cache_key.trim().is_empty() {
            return Err(ConfigError::EmptyCacheKey);
        }
        if self.provider_timeout.is_zero() {
            return Err(ConfigError::ZeroProviderTimeout);
        }
        Ok(())
    }
}

pub fn load_config() -> anyhow::Result<GateConfig> {
    let blocked_countries = std::env::var("GEOGATE_BLOCKED_COUNTRIES")
        .map(|v| BlockList::from_csv(&v))
        .unwrap_or_else(|_| BlockList::from_csv(DEFAULT_BLOCKED_COUNTRIES));

    let cache_ttl_ms = std::env::var("GEOGATE_CACHE_TTL_MS")
        .unwrap_or_else(|_| DEFAULT_CACHE_TTL_MS.to_string())
        .parse()
        .unwrap_or(DEFAULT_CACHE_TTL_MS);

    let cache_key = std::env::var("GEOGATE_CACHE_KEY")
        .unwrap_or_else(|_| DEFAULT_CACHE_KEY.to_string());

    let cache_path = std::env::var("GEOGATE_CACHE_PATH").ok();

    let primary_url = std::env::var("GEOGATE_PRIMARY_URL")
        .unwrap_or_else(|_| DEFAULT_PRIMARY_URL.to_string());

    let fallback_url = std::env::var("GEOGATE_FALLBACK_URL")
        .unwrap_or_else(|_| DEFAULT_FALLBACK_URL.to_string());

    let provider_timeout_ms: u64 = std::env::var("GEOGATE_PROVIDER_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64);

    let mut block_page = BlockPageConfig::default();
    if let Ok(email) = std::env::var("GEOGATE_CONTACT_EMAIL") {
        if !email.trim().is_empty() {
            block_page.show_contact_info = true;
            block_page.contact_email = email.trim().to_string();
        }
    }

    let debug = std::env::var("DEBUG").is_ok();

    let config = GateConfig {
        blocked_countries,
        cache_ttl_ms,
        cache_key,
        cache_path,
        providers: Providers {
            primary: Endpoint::new(primary_url, ResponseSchema::IpApiCo),
            fallback: Endpoint::new(fallback_url, ResponseSchema::IpApiCom),
        },
        provider_timeout: Duration::from_millis(provider_timeout_ms),
        block_page,
        debug,
    };
    config.validate()?;

    Ok(config)
}
