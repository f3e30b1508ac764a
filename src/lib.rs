//! geoGate Library
//!
//! Country-based access gate for a page: resolves the visitor's country
//! (cache, then a primary and a fallback provider), checks it against a
//! blocklist and replaces the page with a block notice when it matches.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::outbound::{
    BlockPageConfig, Endpoint, HtmlBlockRenderer, HttpGeoProvider, MemoryKeyValueStore,
    ResponseSchema, SqliteKeyValueStore,
};
pub use application::{Bootstrap, CountryGate, CountryResolver};
pub use config::{load_config, GateConfig, Providers};
pub use domain::entities::{BlockDecision, CachedLocation, GateOutcome, GateState};
pub use domain::errors::{ProviderError, ResolutionFailure, StorageError};
pub use domain::ports::{BlockRenderer, Clock, GeoProvider, KeyValueStore, SystemClock};
pub use domain::services::{is_blocked, LocationCache};
pub use domain::value_objects::{BlockList, CountryCode};
pub use infrastructure::{Document, ReadyState};
