use agentlog_types::{EntryKind, Event};
use chrono::{DateTime, Utc};

use super::blocks::render_event_lines;
use super::color::{SEPARATOR, TIMESTAMP, paint, role_color};
use super::width::{max_visible_width, truncate_to_width, visible_width, wrap_lines};

/// Minimum left margin, in columns
pub const BASE_PADDING: usize = 2;
const DEFAULT_WIDTH: usize = 80;
/// Two side borders plus their inner spaces
const BORDER_WIDTH: usize = 4;
/// Narrowest interior a bubble is ever given
const MIN_CONTENT_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Users speak from the right, tools and system prompts sit in the
    /// middle, everything else hugs the left margin.
    pub fn for_role(role: &str) -> Self {
        match role {
            "user" => Alignment::Right,
            "tool" | "system" => Alignment::Center,
            _ => Alignment::Left,
        }
    }
}

/// Role (or kind) used for alignment and color, without payload detail
pub fn raw_role(event: &Event) -> &str {
    if event.role.is_set() {
        event.role.as_str()
    } else if !event.kind.as_str().is_empty() {
        event.kind.as_str()
    } else if !event.payload_type.is_empty() {
        &event.payload_type
    } else {
        "event"
    }
}

/// Header label such as `user: message` or `event_msg: token_count`
pub fn role_label(event: &Event) -> String {
    let payload = event.payload_type.as_str();
    if event.role.is_set() {
        let role = event.role.as_str();
        if payload.is_empty() {
            return role.to_string();
        }
        return format!("{}: {}", role, payload);
    }

    let kind = event.kind.as_str();
    if !kind.is_empty() {
        let detailed = matches!(
            event.kind,
            EntryKind::EventMsg | EntryKind::TurnContext | EntryKind::ResponseItem
        );
        if detailed && !payload.is_empty() {
            return format!("{}: {}", kind, payload);
        }
        return kind.to_string();
    }

    if !payload.is_empty() {
        return payload.to_string();
    }
    "event".to_string()
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn header_time(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format("%b %d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Widest interior a bubble may use on a terminal `total_width` columns wide
pub fn content_width(total_width: usize) -> usize {
    let width = total_width.saturating_sub(BASE_PADDING * 2 + 10);
    if width >= 20 {
        return width;
    }
    let narrow = if total_width > 30 {
        total_width - 12
    } else {
        total_width.saturating_sub(8)
    };
    narrow.max(MIN_CONTENT_WIDTH)
}

/// Left offset of a bubble; always within `[0, total - bubble - BORDER_WIDTH]`
pub fn left_pad(total_width: usize, bubble_width: usize, padding: usize, align: Alignment) -> usize {
    let max_pad = total_width.saturating_sub(bubble_width + BORDER_WIDTH);
    match align {
        Alignment::Right => max_pad,
        Alignment::Center => (max_pad / 2).max(padding).min(max_pad),
        Alignment::Left => padding.min(max_pad),
    }
}

/// Lay out events as a vertical stack of bubbles separated by blank lines.
///
/// `width == 0` falls back to 80 columns.
pub fn render_chat_transcript(events: &[Event], width: usize, color: bool) -> Vec<String> {
    let width = if width == 0 { DEFAULT_WIDTH } else { width };

    let mut lines = Vec::with_capacity(events.len() * 6);
    for (idx, event) in events.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.extend(render_bubble(event, width, BASE_PADDING, color));
    }
    lines
}

fn render_bubble(event: &Event, total_width: usize, padding: usize, color: bool) -> Vec<String> {
    let max_content = content_width(total_width);

    let mut label = title_case(&role_label(event));
    if label.is_empty() {
        label = "Event".to_string();
    }
    let time = header_time(event.timestamp);
    let header = format!("{} · {}", label, time);

    let mut body = vec![header.clone()];
    body.extend(render_event_lines(event, 0));
    let mut content = wrap_lines(&body, max_content);
    let bubble_width = max_visible_width(&content).min(max_content);

    let role = raw_role(event);
    let pad = " ".repeat(left_pad(
        total_width,
        bubble_width,
        padding,
        Alignment::for_role(role),
    ));

    // Only an unwrapped header gets colored segments
    if color && content.first() == Some(&header) {
        content[0] = format!(
            "{} · {}",
            paint(&label, role_color(role), true),
            paint(&time, TIMESTAMP, true)
        );
    }

    let rule = "─".repeat(bubble_width + 2);
    let border = paint("│", SEPARATOR, color);

    let mut lines = Vec::with_capacity(content.len() + 2);
    lines.push(format!("{}{}", pad, paint(&format!("╭{}╮", rule), SEPARATOR, color)));
    for line in &content {
        let line = truncate_to_width(line, bubble_width);
        let fill = " ".repeat(bubble_width.saturating_sub(visible_width(&line)));
        lines.push(format!("{}{} {}{} {}", pad, border, line, fill, border));
    }
    lines.push(format!("{}{}", pad, paint(&format!("╰{}╯", rule), SEPARATOR, color)));
    lines
}
