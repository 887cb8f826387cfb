use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Agent-specific fields of the session header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "agent", rename_all = "lowercase")]
pub enum SessionSource {
    Codex {
        originator: String,
        cli_version: String,
    },
    Claude {
        version: String,
    },
}

/// Metadata derived from the first (or first valid) record of a session file.
///
/// `started_at` anchors duration computation; a file without one has no meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub id: String,
    pub path: PathBuf,
    pub cwd: String,
    pub started_at: DateTime<Utc>,
    pub source: SessionSource,
}

/// Result of scanning a file for its first user message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub text: String,
    pub message_count: usize,
    /// Latest non-empty event timestamp seen in the file
    pub last_timestamp: Option<DateTime<Utc>>,
}

impl UserSummary {
    /// Record a timestamp seen during the scan
    pub fn track_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        if let Some(ts) = timestamp
            && self.last_timestamp.is_none_or(|last| ts > last)
        {
            self.last_timestamp = Some(ts);
        }
    }
}

/// One row of the session listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub path: PathBuf,
    pub cwd: String,
    pub started_at: DateTime<Utc>,
    pub summary: String,
    pub message_count: usize,
    pub duration_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SessionSummary {
    pub fn new(meta: SessionMeta, user: UserSummary) -> Self {
        let end = user
            .last_timestamp
            .filter(|last| *last >= meta.started_at)
            .unwrap_or(meta.started_at);
        let duration_seconds = duration_seconds(meta.started_at, Some(end));

        let (originator, cli_version, version) = match meta.source {
            SessionSource::Codex {
                originator,
                cli_version,
            } => (Some(originator), Some(cli_version), None),
            SessionSource::Claude { version } => (None, None, Some(version)),
        };

        Self {
            id: meta.id,
            path: meta.path,
            cwd: meta.cwd,
            started_at: meta.started_at,
            summary: user.text,
            message_count: user.message_count,
            duration_seconds,
            originator,
            cli_version,
            version,
        }
    }
}

/// Whole seconds between `start` and `end`, never negative.
///
/// An unknown end yields zero.
pub fn duration_seconds(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> u64 {
    match end {
        Some(end) if end > start => (end - start).num_seconds().max(0) as u64,
        _ => 0,
    }
}

/// Format seconds as `HH:MM:SS`
pub fn format_duration(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Clip `text` to at most `max_chars` code points, marking the cut with `…`
pub fn clip_text(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars - 1).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_760_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_duration_is_clamped_at_zero() {
        assert_eq!(duration_seconds(at(0), Some(at(90))), 90);
        assert_eq!(duration_seconds(at(90), Some(at(0))), 0);
        assert_eq!(duration_seconds(at(0), None), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(90), "00:01:30");
        assert_eq!(format_duration(3723), "01:02:03");
    }

    #[test]
    fn test_clip_text() {
        assert_eq!(clip_text("hello", 10), "hello");
        assert_eq!(clip_text("hello world", 6), "hello…");
        assert_eq!(clip_text("日本語テキスト", 3), "日本…");
        assert_eq!(clip_text("abc", 0), "");
    }

    #[test]
    fn test_summary_without_dated_events_has_zero_duration() {
        let meta = SessionMeta {
            id: "s1".to_string(),
            path: PathBuf::from("/tmp/s1.jsonl"),
            cwd: "/tmp".to_string(),
            started_at: at(0),
            source: SessionSource::Claude {
                version: "1.0.0".to_string(),
            },
        };
        let summary = SessionSummary::new(meta, UserSummary::default());

        assert_eq!(summary.duration_seconds, 0);
        assert_eq!(summary.version.as_deref(), Some("1.0.0"));
        assert!(summary.originator.is_none());
    }

    #[test]
    fn test_user_summary_tracks_latest_timestamp() {
        let mut user = UserSummary::default();
        user.track_timestamp(Some(at(5)));
        user.track_timestamp(None);
        user.track_timestamp(Some(at(2)));
        assert_eq!(user.last_timestamp, Some(at(5)));
    }
}
