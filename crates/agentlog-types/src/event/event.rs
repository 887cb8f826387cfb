use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::{EntryKind, Role};
use super::metadata::EventMetadata;
use crate::ContentBlock;

/// One decoded log line.
///
/// Built once during a forward scan and never mutated afterwards. `content`
/// is empty for metadata-only records; `raw` is the source line verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// `None` when the record had no timestamp. Never treat it as the epoch.
    pub timestamp: Option<DateTime<Utc>>,
    pub kind: EntryKind,
    pub role: Role,
    /// Secondary discriminator (e.g. `message`, `function_call`, `token_count`)
    pub payload_type: String,
    pub content: Vec<ContentBlock>,
    pub raw: String,
    #[serde(default)]
    pub metadata: EventMetadata,
}

impl Event {
    pub fn new(kind: EntryKind, raw: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            kind,
            role: Role::Unset,
            payload_type: String::new(),
            content: Vec::new(),
            raw: raw.into(),
            metadata: EventMetadata::default(),
        }
    }

    /// Role when present, otherwise the entry kind
    pub fn role_or_kind(&self) -> &str {
        if self.role.is_set() {
            self.role.as_str()
        } else {
            self.kind.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_or_kind_prefers_role() {
        let mut event = Event::new(EntryKind::ResponseItem, "{}");
        assert_eq!(event.role_or_kind(), "response_item");

        event.role = Role::Assistant;
        assert_eq!(event.role_or_kind(), "assistant");
    }

    #[test]
    fn test_serialization() {
        let mut event = Event::new(EntryKind::User, r#"{"type":"user"}"#);
        event.role = Role::User;
        event.content.push(ContentBlock::text("Hello"));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, event);
        assert!(json.contains("\"kind\":\"user\""));
    }
}
