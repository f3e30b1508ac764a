//! Geolocation Provider Port
//!
//! Defines the interface for looking up the visitor's country remotely.

use crate::domain::errors::ProviderError;
use crate::domain::value_objects::CountryCode;
use async_trait::async_trait;

/// A remote service that reports the country of the calling visitor.
///
/// This is an outbound port. Each implementation owns its own success
/// criteria, since providers disagree on field names and on how they
/// signal failure.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Look up the visitor's country.
    ///
    /// Returns a normalized code, or the reason this provider could not
    /// produce one. Implementations must not retry internally.
    async fn lookup(&self) -> Result<CountryCode, ProviderError>;
}
