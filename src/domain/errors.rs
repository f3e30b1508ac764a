//! Domain errors.

use thiserror::Error;

/// Failure of the key-value store backing the location cache.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a single geolocation provider call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("network error calling {provider}: {message}")]
    Network { provider: String, message: String },

    #[error("{provider} did not respond within {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("{provider} returned status {status}")]
    HttpStatus { provider: String, status: u16 },

    #[error("{provider} returned an undecodable body: {message}")]
    Decode { provider: String, message: String },

    #[error("{provider} rejected the lookup: {reason}")]
    Rejected { provider: String, reason: String },

    #[error("{provider} response has no country code")]
    MissingCountry { provider: String },
}

/// Both providers were tried and neither produced a country code.
#[derive(Debug, Error)]
#[error("unable to resolve visitor country (primary: {primary}; fallback: {fallback})")]
pub struct ResolutionFailure {
    pub primary: ProviderError,
    pub fallback: ProviderError,
}
