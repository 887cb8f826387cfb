use agentlog_types::{SessionSummary, format_duration};
use anyhow::Result;
use chrono::SecondsFormat;
use std::io::Write;

use super::width::{visible_width, wrap_text};
use crate::types::ListFormat;

/// Summary cells wrap beyond this many columns in the table
const SUMMARY_MAX_WIDTH: usize = 80;
const PLAIN_HEADER: &str = "timestamp\tsession_id\tcwd\tduration\tmessage_count\tsummary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

struct Column {
    title: &'static str,
    align: Align,
}

const COLUMNS: [Column; 6] = [
    Column { title: "Timestamp", align: Align::Left },
    Column { title: "Session ID", align: Align::Left },
    Column { title: "CWD", align: Align::Left },
    Column { title: "Duration", align: Align::Center },
    Column { title: "Messages", align: Align::Right },
    Column { title: "Summary", align: Align::Left },
];

pub fn write_summaries<W: Write>(
    out: &mut W,
    items: &[SessionSummary],
    header: bool,
    format: ListFormat,
) -> Result<()> {
    match format {
        ListFormat::Table => {
            for line in table_lines(items, header) {
                writeln!(out, "{}", line)?;
            }
        }
        ListFormat::Plain => {
            if header {
                writeln!(out, "{}", PLAIN_HEADER)?;
            }
            for item in items {
                writeln!(out, "{}", row_cells(item).join("\t"))?;
            }
        }
        ListFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
        }
        ListFormat::Jsonl => {
            for item in items {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
            }
        }
    }
    Ok(())
}

fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}

fn row_cells(item: &SessionSummary) -> [String; 6] {
    [
        item.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        item.id.clone(),
        item.cwd.clone(),
        format_duration(item.duration_seconds),
        item.message_count.to_string(),
        escape_newlines(&item.summary),
    ]
}

fn align_cell(text: &str, width: usize, align: Align) -> String {
    let pad = width.saturating_sub(visible_width(text));
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(pad)),
        Align::Right => format!("{}{}", " ".repeat(pad), text),
        Align::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
        }
    }
}

/// Rounded box table, one ruled row per session
pub fn table_lines(items: &[SessionSummary], header: bool) -> Vec<String> {
    let mut rows: Vec<[Vec<String>; 6]> = items
        .iter()
        .map(|item| row_cells(item).map(|cell| vec![cell]))
        .collect();
    if rows.is_empty() {
        rows.push(["-", "(no sessions)", "-", "00:00:00", "0", "-"].map(|cell| vec![cell.to_string()]));
    }
    for row in &mut rows {
        row[5] = wrap_text(&row[5][0], SUMMARY_MAX_WIDTH);
    }

    let titles = COLUMNS.map(|column| column.title.to_uppercase());
    let mut widths = [0usize; 6];
    for (idx, width) in widths.iter_mut().enumerate() {
        let header_width = if header { visible_width(&titles[idx]) } else { 0 };
        let cell_width = rows
            .iter()
            .flat_map(|row| row[idx].iter())
            .map(|line| visible_width(line))
            .max()
            .unwrap_or(0);
        *width = header_width.max(cell_width);
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: [&str; 6], aligns: [Align; 6]| {
        let cells: Vec<String> = (0..6)
            .map(|idx| format!(" {} ", align_cell(cells[idx], widths[idx], aligns[idx])))
            .collect();
        format!("│{}│", cells.join("│"))
    };

    let mut lines = vec![rule("╭", "┬", "╮")];
    if header {
        let titles = [0, 1, 2, 3, 4, 5].map(|idx| titles[idx].as_str());
        lines.push(line(titles, [Align::Center; 6]));
    }
    let aligns = COLUMNS.map(|column| column.align);
    for (idx, row) in rows.iter().enumerate() {
        if header || idx > 0 {
            lines.push(rule("├", "┼", "┤"));
        }
        let height = row.iter().map(Vec::len).max().unwrap_or(1);
        for offset in 0..height {
            let cells = [0, 1, 2, 3, 4, 5]
                .map(|col| row[col].get(offset).map(String::as_str).unwrap_or(""));
            lines.push(line(cells, aligns));
        }
    }
    lines.push(rule("╰", "┴", "╯"));
    lines
}
