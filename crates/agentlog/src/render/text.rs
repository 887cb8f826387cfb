use agentlog_types::Event;
use chrono::SecondsFormat;

use super::blocks::render_event_lines;
use super::color::{SEPARATOR, TIMESTAMP, emphasize, paint, role_color};

/// Numbered transcript entry: header, dashed rule, `| `-prefixed body
pub fn text_event_lines(event: &Event, index: usize, wrap: usize, color: bool) -> Vec<String> {
    let label = match event.role_or_kind() {
        "" => "event".to_string(),
        label => label.to_lowercase(),
    };
    let ts = event
        .timestamp
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string());

    let index_text = format!("#{:03}", index);
    let header_plain = format!("[{}] {} | {}", index_text, label, ts);
    let separator = paint("|", SEPARATOR, color);

    let mut lines = vec![
        format!(
            "[{}] {} {} {}",
            emphasize(&index_text, color),
            paint(&label, role_color(&label), color),
            separator,
            paint(&ts, TIMESTAMP, color)
        ),
        "-".repeat(header_plain.chars().count()),
    ];

    let body = render_event_lines(event, wrap);
    if body.is_empty() {
        lines.push(format!("{} (no content)", separator));
        return lines;
    }
    for line in body {
        if line.is_empty() {
            lines.push(separator.clone());
        } else {
            lines.push(format!("{} {}", separator, line));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlog_types::{ContentBlock, EntryKind, Role};

    #[test]
    fn test_text_event_layout() {
        let mut event = Event::new(EntryKind::ResponseItem, "{}");
        event.role = Role::User;
        event.payload_type = "message".to_string();
        event.timestamp = Some("2025-10-27T12:00:00Z".parse().unwrap());
        event.content.push(ContentBlock::new("input_text", "first\n\nsecond"));

        assert_eq!(
            text_event_lines(&event, 1, 0, false),
            vec![
                "[#001] user | 2025-10-27T12:00:00Z",
                "----------------------------------",
                "| first",
                "|",
                "| second",
            ]
        );
    }

    #[test]
    fn test_empty_event() {
        let event = Event::new(EntryKind::Other("compacted".to_string()), "{}");
        assert_eq!(
            text_event_lines(&event, 12, 0, false),
            vec!["[#012] compacted | -", "--------------------", "| (no content)"]
        );
    }

    #[test]
    fn test_wrap_applies_to_body() {
        let mut event = Event::new(EntryKind::Assistant, "{}");
        event.role = Role::Assistant;
        event.content.push(ContentBlock::text("alpha beta gamma"));
        let lines = text_event_lines(&event, 3, 10, false);
        assert_eq!(&lines[2..], &["| alpha beta", "| gamma"]);
    }

    #[test]
    fn test_colored_header_keeps_rule_width() {
        let mut event = Event::new(EntryKind::Assistant, "{}");
        event.role = Role::Assistant;
        let lines = text_event_lines(&event, 1, 0, true);
        assert!(lines[0].contains("\x1b[38;5;44m"));
        assert_eq!(lines[1].len(), "[#001] assistant | -".len());
    }
}
