use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level discriminator of a log line.
///
/// Codex records use `session_meta`, `response_item`, `event_msg` and
/// `turn_context`; Claude Code records use `user`, `assistant` and `summary`.
/// Anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    SessionMeta,
    ResponseItem,
    EventMsg,
    TurnContext,
    User,
    Assistant,
    Summary,
    Other(String),
    #[default]
    Empty,
}

impl EntryKind {
    pub fn as_str(&self) -> &str {
        match self {
            EntryKind::SessionMeta => "session_meta",
            EntryKind::ResponseItem => "response_item",
            EntryKind::EventMsg => "event_msg",
            EntryKind::TurnContext => "turn_context",
            EntryKind::User => "user",
            EntryKind::Assistant => "assistant",
            EntryKind::Summary => "summary",
            EntryKind::Other(kind) => kind,
            EntryKind::Empty => "",
        }
    }

    /// Records that carry conversation messages (as opposed to metadata or telemetry)
    pub fn is_message_bearing(&self) -> bool {
        matches!(
            self,
            EntryKind::ResponseItem | EntryKind::User | EntryKind::Assistant
        )
    }

    /// Records whose role field is meaningful for filtering
    pub fn carries_role(&self) -> bool {
        self.is_message_bearing()
    }

    /// Session/turn bookkeeping and telemetry records
    pub fn is_context(&self) -> bool {
        matches!(
            self,
            EntryKind::SessionMeta | EntryKind::EventMsg | EntryKind::TurnContext
        )
    }
}

impl From<&str> for EntryKind {
    fn from(value: &str) -> Self {
        match value {
            "session_meta" => EntryKind::SessionMeta,
            "response_item" => EntryKind::ResponseItem,
            "event_msg" => EntryKind::EventMsg,
            "turn_context" => EntryKind::TurnContext,
            "user" => EntryKind::User,
            "assistant" => EntryKind::Assistant,
            "summary" => EntryKind::Summary,
            "" => EntryKind::Empty,
            other => EntryKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EntryKind {
    fn from(value: String) -> Self {
        EntryKind::from(value.as_str())
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized speaker of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
    System,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Role {
    /// Map a source role string onto the normalized set.
    ///
    /// Codex emits `developer` for injected instructions; it is shown as `system`.
    pub fn parse(value: &str) -> Role {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            "system" | "developer" => Role::System,
            _ => Role::Unset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::System => "system",
            Role::Unset => "",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != Role::Unset
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
