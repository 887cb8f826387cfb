use serde::Deserialize;
use serde_json::Value;

use crate::Result;

/// Outer shape shared by every Codex record
#[derive(Debug, Deserialize)]
pub(crate) struct CodexEnvelope {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// Pre-envelope session header: `{"id", "timestamp", ...}` at the top level
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LegacyHeader {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub cwd: Option<String>,
    pub originator: Option<String>,
    pub cli_version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SessionMetaPayload {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub cwd: Option<String>,
    pub originator: Option<String>,
    pub cli_version: Option<String>,
}

/// Flat wire shape of a `response_item` payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseItemFields {
    #[serde(rename = "type")]
    item_type: String,
    role: Option<String>,
    name: Option<String>,
    arguments: Option<Value>,
    input: Option<Value>,
    output: Option<Value>,
    call_id: Option<String>,
    content: Option<Value>,
    summary: Option<Value>,
}

/// `response_item` payload after dispatch on its inner `type`
#[derive(Debug)]
pub(crate) enum ResponseItem {
    Message {
        role: String,
        content: Option<Value>,
    },
    Reasoning {
        content: Option<Value>,
        summary: Option<Value>,
    },
    /// `function_call` and `custom_tool_call`
    ToolCall {
        item_type: String,
        name: Option<String>,
        arguments: Option<Value>,
        call_id: Option<String>,
        content: Option<Value>,
    },
    /// `function_call_output` and `custom_tool_call_output`
    ToolOutput {
        item_type: String,
        output: Option<Value>,
        call_id: Option<String>,
        content: Option<Value>,
    },
    Other {
        item_type: String,
        role: Option<String>,
        call_id: Option<String>,
        content: Option<Value>,
        payload: Value,
    },
}

impl ResponseItem {
    pub fn item_type(&self) -> &str {
        match self {
            ResponseItem::Message { .. } => "message",
            ResponseItem::Reasoning { .. } => "reasoning",
            ResponseItem::ToolCall { item_type, .. }
            | ResponseItem::ToolOutput { item_type, .. }
            | ResponseItem::Other { item_type, .. } => item_type,
        }
    }
}

/// `event_msg` payload after dispatch on its inner `type`
#[derive(Debug)]
pub(crate) enum EventMsg {
    UserMessage(String),
    AgentMessage(String),
    AgentReasoning(String),
    TokenCount(Option<TokenCountInfo>),
    TurnAborted,
    Other { msg_type: String, payload: Value },
}

impl EventMsg {
    pub fn msg_type(&self) -> &str {
        match self {
            EventMsg::UserMessage(_) => "user_message",
            EventMsg::AgentMessage(_) => "agent_message",
            EventMsg::AgentReasoning(_) => "agent_reasoning",
            EventMsg::TokenCount(_) => "token_count",
            EventMsg::TurnAborted => "turn_aborted",
            EventMsg::Other { msg_type, .. } => msg_type,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageFields {
    message: Option<String>,
    content: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenCountFields {
    info: Option<TokenCountInfo>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct TokenCountInfo {
    pub total_token_usage: CodexTokenUsage,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub(crate) struct CodexTokenUsage {
    pub input_tokens: u64,
    pub cached_input_tokens: u64,
    pub output_tokens: u64,
    pub reasoning_output_tokens: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TurnContextPayload {
    pub turn_id: Option<String>,
    pub context: Option<String>,
    pub cwd: Option<String>,
    pub model: Option<String>,
    pub effort: Option<String>,
}

/// Payload of one Codex record, keyed by the envelope's `type`
#[derive(Debug)]
pub(crate) enum CodexPayload {
    SessionMeta(SessionMetaPayload),
    ResponseItem(ResponseItem),
    EventMsg(EventMsg),
    TurnContext(TurnContextPayload),
    Unknown(Option<Value>),
}

impl CodexPayload {
    pub fn decode(kind: &str, payload: Option<Value>) -> Result<Self> {
        let decoded = match kind {
            "session_meta" => CodexPayload::SessionMeta(from_payload(payload)?),
            "response_item" => CodexPayload::ResponseItem(decode_response_item(payload)?),
            "event_msg" => CodexPayload::EventMsg(decode_event_msg(payload)?),
            "turn_context" => CodexPayload::TurnContext(from_payload(payload)?),
            _ => CodexPayload::Unknown(payload),
        };
        Ok(decoded)
    }
}

fn from_payload<T: serde::de::DeserializeOwned>(payload: Option<Value>) -> Result<T> {
    Ok(serde_json::from_value(payload.unwrap_or(Value::Null))?)
}

fn inner_type(payload: &Value) -> String {
    payload
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn decode_response_item(payload: Option<Value>) -> Result<ResponseItem> {
    let payload = payload.unwrap_or(Value::Null);
    let fields: ResponseItemFields = serde_json::from_value(payload.clone())?;

    let item = match fields.item_type.as_str() {
        "message" => ResponseItem::Message {
            role: fields.role.unwrap_or_default(),
            content: fields.content,
        },
        "reasoning" => ResponseItem::Reasoning {
            content: fields.content,
            summary: fields.summary,
        },
        "function_call" | "custom_tool_call" => ResponseItem::ToolCall {
            item_type: fields.item_type,
            name: fields.name,
            arguments: fields.arguments.or(fields.input),
            call_id: fields.call_id,
            content: fields.content,
        },
        "function_call_output" | "custom_tool_call_output" => ResponseItem::ToolOutput {
            item_type: fields.item_type,
            output: fields.output,
            call_id: fields.call_id,
            content: fields.content,
        },
        _ => ResponseItem::Other {
            item_type: fields.item_type,
            role: fields.role,
            call_id: fields.call_id,
            content: fields.content.or(fields.summary),
            payload,
        },
    };
    Ok(item)
}

fn decode_event_msg(payload: Option<Value>) -> Result<EventMsg> {
    let payload = payload.unwrap_or(Value::Null);
    let msg_type = inner_type(&payload);

    let msg = match msg_type.as_str() {
        "user_message" | "agent_message" => {
            let fields: MessageFields = serde_json::from_value(payload)?;
            let text = fields
                .content
                .filter(|content| !content.is_empty())
                .or(fields.message)
                .unwrap_or_default();
            if msg_type == "user_message" {
                EventMsg::UserMessage(text)
            } else {
                EventMsg::AgentMessage(text)
            }
        }
        "agent_reasoning" => {
            let fields: MessageFields = serde_json::from_value(payload)?;
            EventMsg::AgentReasoning(fields.text.unwrap_or_default())
        }
        "token_count" => {
            let fields: TokenCountFields = serde_json::from_value(payload)?;
            EventMsg::TokenCount(fields.info)
        }
        "turn_aborted" => EventMsg::TurnAborted,
        _ => EventMsg::Other { msg_type, payload },
    };
    Ok(msg)
}
