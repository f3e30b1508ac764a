//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the country gate.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::CountryCode;
use serde::{Deserialize, Serialize};

/// The single persisted record: a resolved country and when it was resolved.
///
/// Serialized as `{"countryCode":"CN","timestamp":1700000000000}`.
/// Records are never updated in place, only replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedLocation {
    /// Country code the visitor was resolved to
    #[serde(rename = "countryCode")]
    pub country_code: CountryCode,
    /// Wall-clock milliseconds since the Unix epoch at acquisition
    #[serde(rename = "timestamp")]
    pub resolved_at: i64,
}

impl CachedLocation {
    pub fn new(country_code: CountryCode, resolved_at: i64) -> Self {
        Self {
            country_code,
            resolved_at,
        }
    }

    /// Whether the record is still usable at `now` for the given TTL.
    ///
    /// A non-positive TTL disables caching, and a record stamped in the
    /// future (clock skew) is never trusted.
    pub fn is_valid(&self, now: i64, ttl_ms: i64) -> bool {
        if ttl_ms <= 0 || now < self.resolved_at {
            return false;
        }
        now.checked_sub(self.resolved_at)
            .map_or(false, |age| age < ttl_ms)
    }
}

/// Verdict of the blocklist evaluator for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDecision {
    pub country_code: CountryCode,
    pub blocked: bool,
}

/// Per page-load pipeline state.
///
/// `Idle -> Resolving -> {Allowed | Blocked | AllowedOnFailure}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Resolving,
    Allowed,
    Blocked,
    AllowedOnFailure,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GateState::Allowed | GateState::Blocked | GateState::AllowedOnFailure
        )
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::Idle => write!(f, "idle"),
            GateState::Resolving => write!(f, "resolving"),
            GateState::Allowed => write!(f, "allowed"),
            GateState::Blocked => write!(f, "blocked"),
            GateState::AllowedOnFailure => write!(f, "allowed-on-failure"),
        }
    }
}

/// Terminal result of running the gate once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Page continues. `country` is `None` when the blocklist was empty
    /// and no resolution happened.
    Allowed { country: Option<CountryCode> },
    /// The block action was invoked with this country.
    Blocked { country: CountryCode },
    /// Both providers failed; the page continues.
    AllowedOnFailure,
}

impl GateOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateOutcome::Blocked { .. })
    }

    pub fn state(&self) -> GateState {
        match self {
            GateOutcome::Allowed { .. } => GateState::Allowed,
            GateOutcome::Blocked { .. } => GateState::Blocked,
            GateOutcome::AllowedOnFailure => GateState::AllowedOnFailure,
        }
    }
}
