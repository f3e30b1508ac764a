//! Blocklist Evaluator

use crate::domain::entities::BlockDecision;
use crate::domain::value_objects::{BlockList, CountryCode};

/// Whether `code` is on the blocklist, ignoring case on both sides.
pub fn is_blocked(code: &str, blocked: &BlockList) -> bool {
    match CountryCode::parse(code) {
        Some(code) => blocked
            .iter()
            .any(|entry| entry.as_str().eq_ignore_ascii_case(code.as_str())),
        None => false,
    }
}

/// Evaluate a resolved country against the blocklist.
pub fn evaluate(country: &CountryCode, blocked: &BlockList) -> BlockDecision {
    BlockDecision {
        country_code: country.clone(),
        blocked: is_blocked(country.as_str(), blocked),
    }
}
