//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Country code (ISO 3166-1 alpha-2), always stored trimmed and uppercase.
///
/// Normalization happens at construction, so two codes compare equal
/// regardless of the casing the provider or the operator used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse and normalize a country code.
    ///
    /// Returns `None` for empty or whitespace-only input.
    ///
    /// # Examples
    /// ```
    /// use geo_gate::CountryCode;
    ///
    /// assert_eq!(CountryCode::parse(" cn ").unwrap().as_str(), "CN");
    /// assert!(CountryCode::parse("").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "country code cannot be empty".to_string())
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// Ordered set of country codes whose visitors are denied the page.
///
/// Keeps the order entries were configured in and drops duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockList {
    countries: Vec<CountryCode>,
}

impl BlockList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut countries: Vec<CountryCode> = Vec::new();
        for entry in entries {
            if let Some(code) = CountryCode::parse(entry.as_ref()) {
                if !countries.contains(&code) {
                    countries.push(code);
                }
            }
        }
        Self { countries }
    }

    /// Parse a comma-separated list such as `"CN, ru,KP"`.
    pub fn from_csv(s: &str) -> Self {
        Self::new(s.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn contains(&self, code: &CountryCode) -> bool {
        self.countries.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryCode> {
        self.countries.iter()
    }
}

impl std::fmt::Display for BlockList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.countries.iter().map(CountryCode::as_str).collect();
        write!(f, "{}", joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CountryCode Tests =====

    #[test]
    fn test_country_code_normalizes_case() {
        let tests = vec![("cn", "CN"), ("Ru", "RU"), ("KP", "KP"), (" us\n", "US")];

        for (input, expected) in tests {
            assert_eq!(
                CountryCode::parse(input).unwrap().as_str(),
                expected,
                "Failed for input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_country_code_rejects_blank() {
        for input in ["", "   ", "\t"] {
            assert!(CountryCode::parse(input).is_none(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_country_code_serde_roundtrip_normalizes() {
        let code: CountryCode = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(code.as_str(), "DE");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"DE\"");
    }

    #[test]
    fn test_country_code_serde_rejects_empty() {
        let result: Result<CountryCode, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    // ===== BlockList Tests =====

    #[test]
    fn test_block_list_dedupes_and_keeps_order() {
        let list = BlockList::new(["cn", "RU", "CN", "kp"]);
        let codes: Vec<&str> = list.iter().map(CountryCode::as_str).collect();
        assert_eq!(codes, vec!["CN", "RU", "KP"]);
    }

    #[test]
    fn test_block_list_from_csv_ignores_blanks() {
        let list = BlockList::from_csv(" cn, ,ru,,");
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "CN,RU");
    }

    #[test]
    fn test_block_list_empty() {
        assert!(BlockList::from_csv("").is_empty());
        assert!(BlockList::default().is_empty());
    }
}
