use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Log family an agent writes.
///
/// Codex CLI writes envelope records (`{"type", "payload"}`), Claude Code
/// writes flat message records (`{"type", "message", "uuid", ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Codex,
    #[default]
    Claude,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Codex => "codex",
            AgentKind::Claude => "claude",
        }
    }

    /// Default sessions directory relative to the home directory
    pub fn default_sessions_subdir(&self) -> &'static str {
        match self {
            AgentKind::Codex => ".codex/sessions",
            AgentKind::Claude => ".claude/projects",
        }
    }

    pub fn all() -> [AgentKind; 2] {
        [AgentKind::Codex, AgentKind::Claude]
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codex" => Ok(AgentKind::Codex),
            "claude" | "claude_code" => Ok(AgentKind::Claude),
            other => Err(Error::UnknownAgent(other.to_string())),
        }
    }
}
