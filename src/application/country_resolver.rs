//! Country Resolver
//!
//! Resolves the visitor's country: cache first, then the primary
//! provider, then the fallback provider. Providers are called strictly
//! one after the other and never retried.

use crate::domain::errors::ResolutionFailure;
use crate::domain::ports::GeoProvider;
use crate::domain::services::LocationCache;
use crate::domain::value_objects::CountryCode;
use std::sync::Arc;

pub struct CountryResolver {
    cache: LocationCache,
    primary: Arc<dyn GeoProvider>,
    fallback: Arc<dyn GeoProvider>,
}

impl CountryResolver {
    pub fn new(
        cache: LocationCache,
        primary: Arc<dyn GeoProvider>,
        fallback: Arc<dyn GeoProvider>,
    ) -> Self {
        Self {
            cache,
            primary,
            fallback,
        }
    }

    /// Resolve the visitor's country.
    ///
    /// A cache hit returns without any network call. A fresh answer from
    /// either provider is written to the cache before it is returned.
    pub async fn resolve(&self) -> Result<CountryCode, ResolutionFailure> {
        if let Some(record) = self.cache.read().await {
            return Ok(record.country_code);
        }

        tracing::info!("detecting visitor country");

        let primary_err = match self.primary.lookup().await {
            Ok(country) => {
                tracing::info!(provider = self.primary.name(), country = %country, "country detected");
                self.cache.write(&country).await;
                return Ok(country);
            }
            Err(e) => {
                tracing::warn!("primary provider failed, trying fallback: {}", e);
                e
            }
        };

        match self.fallback.lookup().await {
            Ok(country) => {
                tracing::info!(provider = self.fallback.name(), country = %country, "country detected by fallback");
                self.cache.write(&country).await;
                Ok(country)
            }
            Err(fallback_err) => {
                tracing::error!("all geolocation providers failed: {}", fallback_err);
                Err(ResolutionFailure {
                    primary: primary_err,
                    fallback: fallback_err,
                })
            }
        }
    }
}
