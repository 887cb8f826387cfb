use agentlog_types::{ContentBlock, Event, block_type};
use serde_json::Value;

use super::width::wrap_text;

/// Pretty-print JSON with two-space indentation, keeping source key order
pub fn pretty_json(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(raw).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

fn wrap_body(text: &str, width: usize) -> String {
    text.trim()
        .lines()
        .flat_map(|line| wrap_text(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn labeled_json(label: &str, text: &str) -> String {
    match pretty_json(text) {
        Some(pretty) if pretty != text => format!("{}:\n{}", label, pretty),
        _ => format!("{}: {}", label, text),
    }
}

fn render_block(block: &ContentBlock, width: usize) -> String {
    match block.block_type.as_str() {
        block_type::INPUT_TEXT
        | block_type::OUTPUT_TEXT
        | block_type::TEXT
        | block_type::SUMMARY_TEXT => wrap_body(&block.text, width),
        block_type::JSON => pretty_json(&block.text).unwrap_or_else(|| block.text.clone()),
        block_type::FUNCTION_NAME => format!("Function: {}", block.text),
        block_type::FUNCTION_ARGUMENTS => labeled_json("Arguments", &block.text),
        block_type::FUNCTION_OUTPUT => labeled_json("Output", &block.text),
        other => format!("[{}] {}", other, wrap_body(&block.text, width)),
    }
}

/// Join rendered blocks with newlines; `width == 0` disables wrapping
pub fn render_blocks(blocks: &[ContentBlock], width: usize) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body lines of an event, empty when it has no content
pub fn render_event_lines(event: &Event, width: usize) -> Vec<String> {
    if event.content.is_empty() {
        return Vec::new();
    }
    render_blocks(&event.content, width)
        .replace('\t', "    ")
        .split('\n')
        .map(str::to_string)
        .collect()
}
