//! Core identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque conversation identifier, the sole key into the session registry.
///
/// The route layer may hand us integer row ids or string tokens; both are
/// carried as a string, which is what the registry hashes on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ConversationId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_ids_compare_equal() {
        assert_eq!(ConversationId::from(42), ConversationId::from("42"));
        assert_eq!(ConversationId::from(42).as_str(), "42");
    }

    #[test]
    fn display_matches_inner() {
        assert_eq!(ConversationId::new("abc").to_string(), "abc");
    }
}
