use agentlog_types::{ContentBlock, block_type};
use serde_json::Value;

/// Byte length after which summary assembly stops adding blocks
pub const SUMMARY_SOFT_LIMIT: usize = 160;

/// Flatten a message `content` value into ordered blocks.
///
/// A bare string becomes one text block, an array yields one block per
/// element, and anything else is kept as a single JSON block. `null`
/// produces nothing.
pub fn decode_content(value: &Value) -> Vec<ContentBlock> {
    match value {
        Value::Null => Vec::new(),
        Value::String(text) => vec![ContentBlock::text(text.as_str())],
        Value::Array(items) => items.iter().map(decode_item).collect(),
        other => vec![ContentBlock::json(other.to_string())],
    }
}

/// Same as [`decode_content`] for an optional field
pub fn decode_optional(value: Option<&Value>) -> Vec<ContentBlock> {
    value.map(decode_content).unwrap_or_default()
}

fn decode_item(item: &Value) -> ContentBlock {
    let Value::Object(fields) = item else {
        return match item {
            Value::String(text) => ContentBlock::text(text.as_str()),
            other => ContentBlock::json(other.to_string()),
        };
    };

    let str_field = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or_default();
    let item_type = str_field("type");

    match item_type {
        block_type::TOOL_USE => {
            let mut text = format!("Tool: {} (ID: {})", str_field("name"), str_field("id"));
            if let Some(input) = fields.get("input").filter(|v| !v.is_null()) {
                text.push_str("\nInput: ");
                text.push_str(&input.to_string());
            }
            ContentBlock::new(block_type::TOOL_USE, text)
        }
        block_type::TOOL_RESULT => {
            let mut text = format!("Tool Result (ID: {})", str_field("tool_use_id"));
            if fields.get("is_error").and_then(Value::as_bool) == Some(true) {
                text.push_str(" [error]");
            }
            let output = fields.get("content").map(nested_text).unwrap_or_default();
            if !output.is_empty() {
                text.push_str("\nOutput: ");
                text.push_str(&output);
            }
            ContentBlock::new(block_type::TOOL_RESULT, text)
        }
        block_type::THINKING => ContentBlock::new(block_type::THINKING, str_field("thinking")),
        block_type::IMAGE | "input_image" => ContentBlock::new(block_type::IMAGE, "[image]"),
        _ => match fields.get("text").and_then(Value::as_str) {
            Some(text) if item_type.is_empty() => ContentBlock::text(text),
            Some(text) => ContentBlock::new(item_type, text),
            None => ContentBlock::json(item.to_string()),
        },
    }
}

/// Text of a nested content value, blocks joined by newlines
fn nested_text(value: &Value) -> String {
    decode_content(value)
        .into_iter()
        .map(|block| block.text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join the trimmed prose blocks with spaces, stopping once the collected
/// text reaches [`SUMMARY_SOFT_LIMIT`] bytes.
pub fn summary_text(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks.iter().filter(|b| b.is_textual()) {
        let text = block.text.trim();
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text);
        if out.len() >= SUMMARY_SOFT_LIMIT {
            break;
        }
    }
    out
}
