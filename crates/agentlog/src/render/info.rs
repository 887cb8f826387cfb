use agentlog_types::{SessionMeta, SessionSource, clip_text, duration_seconds, format_duration};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::{self, Write};

use crate::types::SummaryMode;

const LABEL_WIDTH: usize = 14;
const SUMMARY_CLIP: usize = 160;

/// Everything `info` reports about one session file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub jsonl_path: String,
    pub started_at: String,
    pub cwd: String,
    #[serde(flatten)]
    pub source: SessionSource,
    pub message_count: usize,
    pub duration_seconds: u64,
    pub duration_display: String,
    /// Full first user message; clipping only happens in text output
    pub summary: String,
}

impl SessionInfo {
    pub fn new(
        meta: SessionMeta,
        summary: String,
        message_count: usize,
        last_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let end = last_timestamp
            .filter(|last| *last >= meta.started_at)
            .unwrap_or(meta.started_at);
        let seconds = duration_seconds(meta.started_at, Some(end));

        Self {
            session_id: meta.id,
            jsonl_path: meta.path.display().to_string(),
            started_at: meta.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            cwd: meta.cwd,
            source: meta.source,
            message_count,
            duration_seconds: seconds,
            duration_display: format_duration(seconds),
            summary,
        }
    }

    pub fn summary_snippet(&self, mode: SummaryMode) -> String {
        let collapsed = collapse_whitespace(&self.summary);
        match mode {
            SummaryMode::Clip => clip_text(&collapsed, SUMMARY_CLIP),
            SummaryMode::Full => collapsed,
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn write_kv<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{:<width$}: {}", label, value, width = LABEL_WIDTH)
}

pub fn write_info_text<W: Write>(out: &mut W, info: &SessionInfo, mode: SummaryMode) -> io::Result<()> {
    write_kv(out, "Session ID", &info.session_id)?;
    write_kv(out, "Started At", &info.started_at)?;
    write_kv(out, "Duration", &info.duration_display)?;
    write_kv(out, "CWD", &info.cwd)?;
    match &info.source {
        SessionSource::Codex {
            originator,
            cli_version,
        } => {
            write_kv(out, "Originator", originator)?;
            write_kv(out, "CLI Version", cli_version)?;
        }
        SessionSource::Claude { version } => {
            write_kv(out, "Version", version)?;
        }
    }
    write_kv(out, "Message Count", &info.message_count.to_string())?;
    write_kv(out, "JSONL Path", &info.jsonl_path)?;
    write_kv(out, "Summary", &info.summary_snippet(mode))
}
