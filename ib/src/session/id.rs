//! Session ID generation
//!
//! IDs use the format `session_{12-char-hex}`. The suffix is taken from the
//! random tail of a UUIDv7 so IDs generated in the same millisecond still differ.

use tracing::debug;

/// Prefix shared by every generated session ID
const SESSION_PREFIX: &str = "session_";

/// Length of the random suffix
const SUFFIX_LEN: usize = 12;

/// Opaque session identifier used to correlate requests with the synthesis service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session ID
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::now_v7().simple().to_string();
        // The leading 48 bits of a v7 UUID are the timestamp; the tail is random
        let suffix = &uuid[uuid.len() - SUFFIX_LEN..];
        let id = format!("{}{}", SESSION_PREFIX, suffix);
        debug!(%id, "SessionId::generate: called");
        Self(id)
    }

    /// Wrap an existing ID string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the full ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_format() {
        let id = SessionId::generate();
        assert!(id.as_str().starts_with("session_"));
        assert_eq!(id.as_str().len(), SESSION_PREFIX.len() + SUFFIX_LEN);
        assert!(id.as_str()[SESSION_PREFIX.len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_unique_in_tight_loop() {
        let ids: HashSet<SessionId> = (0..1000).map(|_| SessionId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SessionId::from_string("session_abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"session_abc\"");

        let back: SessionId = serde_json::from_str("\"session_abc\"").unwrap();
        assert_eq!(back, id);
    }
}
