use serde::Deserialize;
use serde_json::Value;

/// One Claude Code transcript line.
///
/// Every kind shares this shape; the kind decides which fields matter.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ClaudeEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: Option<String>,
    pub parent_uuid: Option<String>,
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub request_id: Option<String>,
    pub is_meta: bool,
    pub message: Option<Value>,
    pub summary: Option<Value>,
    pub leaf_uuid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ClaudeMessage {
    pub id: Option<String>,
    pub role: Option<String>,
    pub model: Option<String>,
    pub content: Option<Value>,
    pub usage: Option<ClaudeUsage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ClaudeUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_input_tokens: u64,
    pub cache_read_input_tokens: u64,
    pub service_tier: Option<String>,
}
