use agentlog_types::{
    AgentKind, ContentBlock, EntryKind, Event, Role, SessionMeta, SessionSource, UserSummary,
    block_type,
};
use serde_json::Value;
use std::path::Path;
use tracing::trace;

use super::schema::{
    CodexEnvelope, CodexPayload, EventMsg, LegacyHeader, ResponseItem, SessionMetaPayload,
    TokenCountInfo, TurnContextPayload,
};
use crate::content::{decode_optional, summary_text};
use crate::scanner::LineScanner;
use crate::timestamp::{parse_optional_timestamp, parse_timestamp};
use crate::traits::SessionParser;
use crate::{Error, Result};

/// Prefixes of user messages that Codex injects as context rather than prompts
const INJECTED_PREFIXES: [&str; 2] = ["<environment_context>", "<user_instructions>"];

/// Decoder for Codex CLI rollout files.
///
/// Malformed lines are fatal: the whole scan aborts on the first one.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodexParser;

impl SessionParser for CodexParser {
    fn agent(&self) -> AgentKind {
        AgentKind::Codex
    }

    fn decode_line(&self, line: &[u8]) -> Result<Option<Event>> {
        decode_event(std::str::from_utf8(line)?).map(Some)
    }

    fn read_session_meta(&self, path: &Path) -> Result<SessionMeta> {
        for line in LineScanner::open(path)? {
            let line = line?;
            let meta = line
                .as_str()
                .and_then(|text| session_meta_from_line(text, path))
                .map_err(|err| err.at_line(line.number))?;
            if let Some(meta) = meta {
                return Ok(meta);
            }
        }
        Err(Error::SessionMetaNotFound)
    }

    fn first_user_summary(&self, path: &Path) -> Result<UserSummary> {
        let mut summary = UserSummary::default();
        self.iterate_events(path, &mut |event| {
            summary.track_timestamp(event.timestamp);
            if event.kind != EntryKind::ResponseItem {
                return Ok(());
            }
            summary.message_count += 1;
            if summary.text.is_empty() && event.role == Role::User {
                let text = summary_text(&event.content);
                if !is_injected_context(&text) {
                    summary.text = text;
                }
            }
            Ok(())
        })?;
        Ok(summary)
    }
}

fn is_injected_context(text: &str) -> bool {
    INJECTED_PREFIXES
        .iter()
        .any(|prefix| text.starts_with(prefix))
}

/// Decode one Codex record into an event
pub(crate) fn decode_event(raw: &str) -> Result<Event> {
    let envelope: CodexEnvelope = serde_json::from_str(raw)?;
    let mut event = Event::new(EntryKind::from(envelope.kind.as_str()), raw);
    event.timestamp = parse_optional_timestamp(envelope.timestamp.as_deref())?;
    trace!(kind = %event.kind, "decoding codex record");

    match CodexPayload::decode(&envelope.kind, envelope.payload)? {
        CodexPayload::SessionMeta(meta) => {
            event.payload_type = meta.originator.unwrap_or_default();
            let id = meta.id.unwrap_or_default();
            event.content.push(ContentBlock::new(block_type::ID, id.as_str()));
            event.metadata.session_id = Some(id).filter(|id| !id.is_empty());
            event.metadata.cwd = meta.cwd.filter(|cwd| !cwd.is_empty());
        }
        CodexPayload::ResponseItem(item) => apply_response_item(&mut event, item),
        CodexPayload::EventMsg(msg) => {
            event.payload_type = msg.msg_type().to_string();
            event.content = event_msg_blocks(msg);
        }
        CodexPayload::TurnContext(turn) => {
            event.payload_type = "turn_context".to_string();
            event.content.push(ContentBlock::text(turn_context_text(&turn)));
            event.metadata.cwd = turn.cwd.filter(|cwd| !cwd.is_empty());
            event.metadata.model = turn.model.filter(|model| !model.is_empty());
        }
        CodexPayload::Unknown(Some(payload)) if !payload.is_null() => {
            event.content.push(ContentBlock::json(payload.to_string()));
        }
        CodexPayload::Unknown(_) => {}
    }

    Ok(event)
}

fn apply_response_item(event: &mut Event, item: ResponseItem) {
    event.payload_type = item.item_type().to_string();

    match item {
        ResponseItem::Message { role, content } => {
            event.role = Role::parse(&role);
            event.content = decode_optional(content.as_ref());
        }
        ResponseItem::Reasoning { content, summary } => {
            let blocks = decode_optional(content.as_ref());
            event.content = if blocks.is_empty() {
                decode_optional(summary.as_ref())
            } else {
                blocks
            };
        }
        ResponseItem::ToolCall {
            name,
            arguments,
            call_id,
            content,
            ..
        } => {
            event.metadata.call_id = call_id;
            event.content = match name.filter(|name| !name.is_empty()) {
                Some(name) => vec![
                    ContentBlock::new(block_type::FUNCTION_NAME, name),
                    ContentBlock::new(
                        block_type::FUNCTION_ARGUMENTS,
                        value_text(arguments.as_ref()),
                    ),
                ],
                None => decode_optional(content.as_ref()),
            };
        }
        ResponseItem::ToolOutput {
            output,
            call_id,
            content,
            ..
        } => {
            event.metadata.call_id = call_id;
            let output = value_text(output.as_ref());
            event.content = if output.is_empty() {
                decode_optional(content.as_ref())
            } else {
                vec![ContentBlock::new(block_type::FUNCTION_OUTPUT, output)]
            };
        }
        ResponseItem::Other {
            role,
            call_id,
            content,
            payload,
            ..
        } => {
            event.role = role.as_deref().map(Role::parse).unwrap_or_default();
            event.metadata.call_id = call_id;
            let blocks = decode_optional(content.as_ref());
            event.content = if blocks.is_empty() && !payload.is_null() {
                vec![ContentBlock::json(payload.to_string())]
            } else {
                blocks
            };
        }
    }
}

/// String fields are used as-is; structured values are kept as JSON text
fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn event_msg_blocks(msg: EventMsg) -> Vec<ContentBlock> {
    match msg {
        EventMsg::UserMessage(text)
        | EventMsg::AgentMessage(text)
        | EventMsg::AgentReasoning(text) => {
            if text.is_empty() {
                Vec::new()
            } else {
                vec![ContentBlock::text(text)]
            }
        }
        EventMsg::TokenCount(info) => vec![ContentBlock::text(token_count_text(info.as_ref()))],
        EventMsg::TurnAborted => vec![ContentBlock::text("Turn aborted")],
        EventMsg::Other { payload, .. } => vec![ContentBlock::json(payload.to_string())],
    }
}

fn token_count_text(info: Option<&TokenCountInfo>) -> String {
    let Some(info) = info else {
        return "Token usage unavailable".to_string();
    };
    let usage = &info.total_token_usage;
    let mut text = format!(
        "Tokens: {} in / {} out",
        usage.input_tokens, usage.output_tokens
    );
    if usage.cached_input_tokens > 0 {
        text.push_str(&format!(" ({} cached)", usage.cached_input_tokens));
    }
    if usage.reasoning_output_tokens > 0 {
        text.push_str(&format!(" [{} reasoning]", usage.reasoning_output_tokens));
    }
    text
}

fn turn_context_text(turn: &TurnContextPayload) -> String {
    let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

    if let (Some(id), Some(context)) = (present(&turn.turn_id), present(&turn.context)) {
        return format!("Turn: {} - {}", id, context);
    }

    let parts: Vec<String> = [
        ("Model", &turn.model),
        ("Effort", &turn.effort),
        ("CWD", &turn.cwd),
    ]
    .into_iter()
    .filter_map(|(label, value)| present(value).map(|v| format!("{}: {}", label, v)))
    .collect();

    if parts.is_empty() {
        "Turn context".to_string()
    } else {
        parts.join(", ")
    }
}

/// Session header carried by a line, if it is one.
///
/// `session_meta` records are canonical; an envelope-less record with a
/// top-level `id` is accepted as a legacy header.
fn session_meta_from_line(raw: &str, path: &Path) -> Result<Option<SessionMeta>> {
    let value: Value = serde_json::from_str(raw)?;

    if value.get("type").and_then(Value::as_str) == Some("session_meta") {
        let envelope: CodexEnvelope = serde_json::from_value(value)?;
        let payload: SessionMetaPayload =
            serde_json::from_value(envelope.payload.unwrap_or(Value::Null))?;
        let timestamp = payload
            .timestamp
            .filter(|ts| !ts.is_empty())
            .or(envelope.timestamp)
            .filter(|ts| !ts.is_empty())
            .ok_or_else(|| Error::Parse("session_meta record has no timestamp".to_string()))?;

        return Ok(Some(SessionMeta {
            id: payload.id.unwrap_or_default(),
            path: path.to_path_buf(),
            cwd: payload.cwd.unwrap_or_default(),
            started_at: parse_timestamp(&timestamp)?,
            source: SessionSource::Codex {
                originator: payload.originator.unwrap_or_default(),
                cli_version: payload.cli_version.unwrap_or_default(),
            },
        }));
    }

    let Ok(legacy) = serde_json::from_value::<LegacyHeader>(value) else {
        return Ok(None);
    };
    let (Some(id), Some(timestamp)) = (
        legacy.id.filter(|id| !id.is_empty()),
        legacy.timestamp.filter(|ts| !ts.is_empty()),
    ) else {
        return Ok(None);
    };

    Ok(Some(SessionMeta {
        id,
        path: path.to_path_buf(),
        cwd: legacy.cwd.unwrap_or_default(),
        started_at: parse_timestamp(&timestamp)?,
        source: SessionSource::Codex {
            originator: legacy.originator.unwrap_or_default(),
            cli_version: legacy.cli_version.unwrap_or_default(),
        },
    }))
}
