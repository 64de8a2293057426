use serde::{Deserialize, Serialize};

/// Two-letter territory code used to select regional streaming offers
/// (e.g. "GB", "US"). Always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    /// Returns the upper-case code.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self("GB".to_string())
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string is not a two-letter region code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid region code '{0}': expected two ASCII letters")]
pub struct RegionParseError(pub String);

impl std::str::FromStr for Region {
    type Err = RegionParseError;

    /// Parse a region code case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(RegionParseError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Region {
    type Error = RegionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_uppercases() {
        let region: Region = "us".parse().unwrap();
        assert_eq!(region.code(), "US");
        assert_eq!(region.to_string(), "US");
    }

    #[test]
    fn rejects_bad_codes() {
        for input in ["", "U", "USA", "u1", "  "] {
            assert!(input.parse::<Region>().is_err(), "'{}' should not parse", input);
        }
    }

    #[test]
    fn default_is_gb() {
        assert_eq!(Region::default().code(), "GB");
    }
}
