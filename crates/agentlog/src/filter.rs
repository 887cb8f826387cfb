use agentlog_types::{AgentKind, EntryKind, Event, Role};
use std::collections::HashSet;

use crate::error::UsageError;

const CODEX_ENTRY_KINDS: &[&str] = &["session_meta", "response_item", "event_msg", "turn_context"];
const CLAUDE_ENTRY_KINDS: &[&str] = &["user", "assistant", "summary", "system"];

const CODEX_PAYLOAD_TYPES: &[&str] = &[
    "message",
    "reasoning",
    "function_call",
    "function_call_output",
    "custom_tool_call",
    "custom_tool_call_output",
];
const CLAUDE_PAYLOAD_TYPES: &[&str] = &["message", "summary"];

const EVENT_MSG_TYPES: &[&str] = &[
    "token_count",
    "agent_reasoning",
    "user_message",
    "agent_message",
    "turn_aborted",
];

const ROLES: &[&str] = &["user", "assistant", "tool", "system"];

/// Raw filter arguments as given on the command line
#[derive(Debug, Clone, Default)]
pub struct FilterArgs<'a> {
    pub all: bool,
    pub entry_types: Option<&'a str>,
    pub payload_types: Option<&'a str>,
    pub event_msg_types: Option<&'a str>,
    pub roles: Option<&'a str>,
}

impl FilterArgs<'_> {
    fn has_explicit_filter(&self) -> bool {
        [
            self.entry_types,
            self.payload_types,
            self.event_msg_types,
            self.roles,
        ]
        .iter()
        .any(|arg| arg.is_some_and(|value| !value.trim().is_empty()))
    }
}

/// Inclusion sets applied to every event before numbering.
///
/// `None` leaves a dimension unconstrained. The payload-type and role sets
/// only constrain message-bearing kinds; the event_msg set only constrains
/// `event_msg` records. A role-less message-bearing record fails any role set,
/// so tool calls and reasoning need `-R all` next to their payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub entry_kinds: Option<HashSet<String>>,
    pub payload_types: Option<HashSet<String>>,
    pub event_msg_types: Option<HashSet<String>>,
    pub roles: Option<HashSet<Role>>,
}

impl EventFilter {
    /// Let every event through
    pub fn everything() -> Self {
        Self {
            entry_kinds: None,
            payload_types: None,
            event_msg_types: None,
            roles: None,
        }
    }

    /// Conversation messages between the user and the assistant only
    pub fn defaults(agent: AgentKind) -> Self {
        let entry_kinds: &[&str] = match agent {
            AgentKind::Codex => &["response_item"],
            AgentKind::Claude => &["user", "assistant"],
        };
        Self {
            entry_kinds: Some(to_set(entry_kinds)),
            payload_types: Some(to_set(&["message"])),
            event_msg_types: None,
            roles: Some(HashSet::from([Role::User, Role::Assistant])),
        }
    }

    pub fn from_args(agent: AgentKind, args: &FilterArgs<'_>) -> Result<Self, UsageError> {
        if args.all {
            if args.has_explicit_filter() {
                return Err(UsageError::MutuallyExclusive(
                    "--all",
                    "-E/-T/-M/-R filters",
                ));
            }
            return Ok(Self::everything());
        }

        let (entry_valid, payload_valid) = match agent {
            AgentKind::Codex => (CODEX_ENTRY_KINDS, CODEX_PAYLOAD_TYPES),
            AgentKind::Claude => (CLAUDE_ENTRY_KINDS, CLAUDE_PAYLOAD_TYPES),
        };
        let defaults = Self::defaults(agent);

        let entry_kinds = match parse_list(args.entry_types, "entry type", entry_valid)? {
            Selection::Default => defaults.entry_kinds,
            Selection::Any => None,
            Selection::Only(set) => Some(set),
        };
        let payload_types = match parse_list(args.payload_types, "payload type", payload_valid)? {
            Selection::Default => defaults.payload_types,
            Selection::Any => None,
            Selection::Only(set) => Some(set),
        };
        let event_msg_types =
            match parse_list(args.event_msg_types, "event_msg type", EVENT_MSG_TYPES)? {
                Selection::Default | Selection::Any => None,
                Selection::Only(set) => Some(set),
            };
        let roles = match parse_list(args.roles, "role", ROLES)? {
            Selection::Default => defaults.roles,
            Selection::Any => None,
            Selection::Only(set) => Some(set.iter().map(|role| Role::parse(role)).collect()),
        };

        Ok(Self {
            entry_kinds,
            payload_types,
            event_msg_types,
            roles,
        })
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(kinds) = &self.entry_kinds
            && !kinds.contains(event.kind.as_str())
        {
            return false;
        }

        if event.kind.is_message_bearing()
            && let Some(types) = &self.payload_types
            && !types.contains(event.payload_type.as_str())
        {
            return false;
        }

        if event.kind.carries_role()
            && let Some(roles) = &self.roles
            && !roles.contains(&event.role)
        {
            return false;
        }

        if event.kind == EntryKind::EventMsg
            && let Some(types) = &self.event_msg_types
            && !types.contains(event.payload_type.as_str())
        {
            return false;
        }

        true
    }
}

fn to_set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Outcome of parsing one filter list
#[derive(Debug, PartialEq, Eq)]
enum Selection {
    /// Argument absent or blank
    Default,
    /// The single token `all`
    Any,
    Only(HashSet<String>),
}

/// Split a comma-separated list into lowercase, trimmed, non-empty tokens
pub fn parse_csv(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

fn parse_list(
    arg: Option<&str>,
    category: &'static str,
    valid: &[&str],
) -> Result<Selection, UsageError> {
    let values = arg.map(parse_csv).unwrap_or_default();
    if values.is_empty() {
        return Ok(Selection::Default);
    }
    if values.len() == 1 && values[0] == "all" {
        return Ok(Selection::Any);
    }

    let mut set = HashSet::with_capacity(values.len());
    for token in values {
        if !valid.contains(&token.as_str()) {
            return Err(UsageError::UnknownToken { category, token });
        }
        set.insert(token);
    }
    Ok(Selection::Only(set))
}
