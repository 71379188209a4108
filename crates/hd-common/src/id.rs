//! Person identity type.
//!
//! People are identified by the name column of the pedigree table. Names are
//! unique within one pedigree and stable for the lifetime of a computation.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Person identifier wrapper with display formatting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a table cell into an optional id; blank cells mean "absent".
    pub fn parse_optional(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PersonId(trimmed.to_string()))
        }
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(name: &str) -> Self {
        PersonId(name.to_string())
    }
}

impl From<String> for PersonId {
    fn from(name: String) -> Self {
        PersonId(name)
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_blank_is_none() {
        assert_eq!(PersonId::parse_optional(""), None);
        assert_eq!(PersonId::parse_optional("   "), None);
    }

    #[test]
    fn test_parse_optional_trims() {
        assert_eq!(PersonId::parse_optional(" Lily "), Some(PersonId::from("Lily")));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&PersonId::from("James")).unwrap();
        assert_eq!(json, "\"James\"");
    }
}
