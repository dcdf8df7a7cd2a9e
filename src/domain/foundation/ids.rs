//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of a conversation (and of its broadcast channel).
///
/// Opaque to the core: callers may supply any string, and a random
/// 128-bit identifier is generated when none is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Wraps a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier (UUIDv4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a caller-supplied identifier, rejecting empty strings.
    ///
    /// The registry itself accepts any identifier; transports use this to
    /// reject obviously malformed input before it reaches the core.
    pub fn parse(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("conversation_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a participant in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wraps a participant identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Wraps a participant identifier, rejecting blank strings.
    pub fn parse(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("sender"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Token identifying one broadcast subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionToken(Uuid);

impl SubscriptionToken {
    /// Creates a new random token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubscriptionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Key of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Creates a key, rejecting empty keys and path traversal.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::empty_field("object_key"));
        }
        if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(ValidationError::invalid_format(
                "object_key",
                "must be a single path segment",
            ));
        }
        Ok(Self(key))
    }

    /// Generates a unique key for an upload, keeping the original extension.
    ///
    /// `photo.jpg` becomes `<uuid>.jpg`; names without an extension get a bare UUID.
    pub fn for_upload(original_name: Option<&str>) -> Self {
        let extension = original_name
            .and_then(|name| name.rfind('.').map(|idx| &name[idx..]))
            .filter(|ext| ext.len() > 1 && !ext.contains('/') && !ext.contains('\\'))
            .unwrap_or("");
        Self(format!("{}{}", Uuid::new_v4(), extension))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_conversation_ids_are_unique() {
        let a = ConversationId::generate();
        let b = ConversationId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn conversation_id_parse_rejects_blank() {
        assert!(ConversationId::parse("").is_err());
        assert!(ConversationId::parse("   ").is_err());
        assert_eq!(ConversationId::parse("c1").unwrap().as_str(), "c1");
    }

    #[test]
    fn participant_id_parse_rejects_blank() {
        assert!(ParticipantId::parse("").is_err());
        assert_eq!(ParticipantId::parse("alice").unwrap().to_string(), "alice");
    }

    #[test]
    fn conversation_id_serializes_transparently() {
        let id = ConversationId::new("room-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"room-7\"");
    }

    #[test]
    fn subscription_token_roundtrips_through_display() {
        let token = SubscriptionToken::new();
        let parsed: SubscriptionToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn object_key_rejects_path_segments() {
        assert!(ObjectKey::new("").is_err());
        assert!(ObjectKey::new("../etc/passwd").is_err());
        assert!(ObjectKey::new("a/b").is_err());
        assert!(ObjectKey::new("..").is_err());
        assert!(ObjectKey::new("report.pdf").is_ok());
    }

    #[test]
    fn upload_key_keeps_extension() {
        let key = ObjectKey::for_upload(Some("holiday.photo.jpg"));
        assert!(key.as_str().ends_with(".jpg"));
        assert_eq!(key.as_str().len(), 36 + 4);
    }

    #[test]
    fn upload_key_without_extension_is_bare_uuid() {
        assert_eq!(ObjectKey::for_upload(Some("README")).as_str().len(), 36);
        assert_eq!(ObjectKey::for_upload(None).as_str().len(), 36);
        assert_eq!(ObjectKey::for_upload(Some("trailing.")).as_str().len(), 36);
    }
}
