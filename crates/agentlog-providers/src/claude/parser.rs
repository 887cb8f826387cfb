use agentlog_types::{
    AgentKind, ContentBlock, EntryKind, Event, Role, SessionMeta, SessionSource, TokenUsage,
    UserSummary, block_type,
};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, trace};

use super::schema::{ClaudeEntry, ClaudeMessage};
use crate::content::{decode_optional, summary_text};
use crate::scanner::LineScanner;
use crate::timestamp::parse_optional_timestamp;
use crate::traits::SessionParser;
use crate::{Error, Result};

/// Decoder for Claude Code project transcripts.
///
/// Lines that fail to decode are skipped and the scan continues.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClaudeParser;

impl SessionParser for ClaudeParser {
    fn agent(&self) -> AgentKind {
        AgentKind::Claude
    }

    fn decode_line(&self, line: &[u8]) -> Result<Option<Event>> {
        let decoded = std::str::from_utf8(line)
            .map_err(Error::from)
            .and_then(decode_event);
        match decoded {
            Ok(event) => Ok(Some(event)),
            Err(err) => {
                debug!(error = %err, "skipping malformed claude line");
                Ok(None)
            }
        }
    }

    fn read_session_meta(&self, path: &Path) -> Result<SessionMeta> {
        for line in LineScanner::open(path)? {
            let line = line?;
            let Some(event) = self.decode_line(&line.bytes)? else {
                continue;
            };
            let Some(started_at) = event.timestamp else {
                continue;
            };

            let metadata = event.metadata;
            let id = metadata
                .session_id
                .filter(|id| !id.is_empty())
                .or_else(|| file_stem(path))
                .unwrap_or_default();
            return Ok(SessionMeta {
                id,
                path: path.to_path_buf(),
                cwd: metadata.cwd.unwrap_or_default(),
                started_at,
                source: SessionSource::Claude {
                    version: metadata.version.unwrap_or_default(),
                },
            });
        }
        Err(Error::SessionMetaNotFound)
    }

    fn first_user_summary(&self, path: &Path) -> Result<UserSummary> {
        let mut summary = UserSummary::default();
        let mut fallback = String::new();

        self.iterate_events(path, &mut |event| {
            summary.track_timestamp(event.timestamp);
            match event.kind {
                EntryKind::User => {
                    summary.message_count += 1;
                    if summary.text.is_empty() && !event.metadata.is_meta {
                        summary.text = summary_text(&event.content);
                    }
                }
                EntryKind::Assistant => summary.message_count += 1,
                EntryKind::Summary if fallback.is_empty() => {
                    fallback = summary_text(&event.content);
                }
                _ => {}
            }
            Ok(())
        })?;

        if summary.text.is_empty() {
            summary.text = fallback;
        }
        Ok(summary)
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Decode one Claude Code line into an event
pub(crate) fn decode_event(raw: &str) -> Result<Event> {
    let entry: ClaudeEntry = serde_json::from_str(raw)?;
    let mut event = Event::new(EntryKind::from(entry.kind.as_str()), raw);
    event.timestamp = parse_optional_timestamp(entry.timestamp.as_deref())?;
    trace!(kind = %event.kind, "decoding claude record");

    let metadata = &mut event.metadata;
    metadata.session_id = entry.session_id;
    metadata.uuid = entry.uuid;
    metadata.parent_uuid = entry.parent_uuid;
    metadata.cwd = entry.cwd;
    metadata.version = entry.version;
    metadata.request_id = entry.request_id;
    metadata.is_meta = entry.is_meta;

    match event.kind {
        EntryKind::User | EntryKind::Assistant => {
            event.payload_type = "message".to_string();
            let message = entry
                .message
                .filter(|message| !message.is_null())
                .map(serde_json::from_value::<ClaudeMessage>)
                .transpose()?
                .unwrap_or_default();
            event.role = message
                .role
                .as_deref()
                .map(Role::parse)
                .filter(Role::is_set)
                .unwrap_or(if event.kind == EntryKind::User {
                    Role::User
                } else {
                    Role::Assistant
                });
            event.content = decode_optional(message.content.as_ref());

            let metadata = &mut event.metadata;
            metadata.message_id = message.id;
            metadata.model = message.model;
            metadata.usage = message.usage.map(|usage| TokenUsage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
                cache_creation_input_tokens: usage.cache_creation_input_tokens,
                cache_read_input_tokens: usage.cache_read_input_tokens,
                service_tier: usage.service_tier,
            });
        }
        EntryKind::Summary => {
            event.payload_type = "summary".to_string();
            let text = entry
                .summary
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if !text.is_empty() {
                event
                    .content
                    .push(ContentBlock::new(block_type::SUMMARY_TEXT, text.as_str()));
                event.metadata.summary_text = Some(text);
            }
            event.metadata.leaf_uuid = entry.leaf_uuid;
        }
        _ => {
            event.content.push(ContentBlock::json(raw.trim()));
        }
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_session(dir: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_user_string_content() {
        let event = decode_event(
            r#"{"type":"user","uuid":"u1","parentUuid":null,"sessionId":"s1","cwd":"/repo","version":"2.0.1","timestamp":"2025-10-27T12:00:00.000Z","message":{"role":"user","content":"hello"}}"#,
        )
        .unwrap();

        assert_eq!(event.kind, EntryKind::User);
        assert_eq!(event.role, Role::User);
        assert_eq!(event.payload_type, "message");
        assert_eq!(event.content, vec![ContentBlock::text("hello")]);
        assert_eq!(event.metadata.uuid.as_deref(), Some("u1"));
        assert_eq!(event.metadata.parent_uuid, None);
        assert_eq!(event.metadata.session_id.as_deref(), Some("s1"));
        assert_eq!(event.metadata.version.as_deref(), Some("2.0.1"));
    }

    #[test]
    fn test_assistant_metadata_and_usage() {
        let event = decode_event(
            r#"{"type":"assistant","uuid":"a1","requestId":"req_1","timestamp":"2025-10-27T12:00:01Z","message":{"id":"msg_1","model":"claude-sonnet-4-5","role":"assistant","content":[{"type":"thinking","thinking":"plan"},{"type":"text","text":"Hi"}],"usage":{"input_tokens":10,"output_tokens":5,"cache_read_input_tokens":100,"service_tier":"standard"}}}"#,
        )
        .unwrap();

        assert_eq!(event.role, Role::Assistant);
        assert_eq!(
            event.content,
            vec![ContentBlock::new("thinking", "plan"), ContentBlock::text("Hi")]
        );
        assert_eq!(event.metadata.message_id.as_deref(), Some("msg_1"));
        assert_eq!(event.metadata.request_id.as_deref(), Some("req_1"));
        assert_eq!(event.metadata.model.as_deref(), Some("claude-sonnet-4-5"));
        let usage = event.metadata.usage.unwrap();
        assert_eq!(usage.input_tokens, 10);
        assert_eq!(usage.cache_read_input_tokens, 100);
        assert_eq!(usage.cache_creation_input_tokens, 0);
        assert_eq!(usage.service_tier.as_deref(), Some("standard"));
    }

    #[test]
    fn test_missing_role_falls_back_to_kind() {
        let event = decode_event(r#"{"type":"assistant","message":{"content":"x"}}"#).unwrap();
        assert_eq!(event.role, Role::Assistant);
        assert_eq!(event.timestamp, None);
    }

    #[test]
    fn test_summary_record() {
        let event =
            decode_event(r#"{"type":"summary","summary":"Refactor parser","leafUuid":"l1"}"#).unwrap();
        assert_eq!(event.payload_type, "summary");
        assert_eq!(
            event.content,
            vec![ContentBlock::new("summary_text", "Refactor parser")]
        );
        assert_eq!(event.metadata.summary_text.as_deref(), Some("Refactor parser"));
        assert_eq!(event.metadata.leaf_uuid.as_deref(), Some("l1"));
    }

    #[test]
    fn test_unknown_kind_keeps_raw_line() {
        let raw = r#"{"type":"file-history-snapshot","messageId":"m1","snapshot":{}}"#;
        let event = decode_event(raw).unwrap();
        assert_eq!(event.kind, EntryKind::Other("file-history-snapshot".to_string()));
        assert_eq!(event.content, vec![ContentBlock::json(raw)]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_session(
            &dir,
            "s.jsonl",
            &[
                r#"{"type":"user","timestamp":"2025-10-27T12:00:00Z","message":{"role":"user","content":"one"}}"#,
                "{broken",
                r#"{"type":"assistant","timestamp":"2025-10-27T12:00:05Z","message":{"role":"assistant","content":"two"}}"#,
            ],
        );

        let mut texts = Vec::new();
        ClaudeParser
            .iterate_events(&path, &mut |event| {
                texts.push(event.content[0].text.clone());
                Ok(())
            })
            .unwrap();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_message_less_records_are_kept() {
        let event =
            decode_event(r#"{"type":"user","sessionId":"s","timestamp":"2025-10-27T12:00:00Z"}"#)
                .unwrap();
        assert_eq!(event.kind, EntryKind::User);
        assert_eq!(event.role, Role::User);
        assert!(event.content.is_empty());

        let event = decode_event(
            r#"{"type":"assistant","timestamp":"2025-10-27T12:00:01Z","message":null}"#,
        )
        .unwrap();
        assert_eq!(event.role, Role::Assistant);
        assert!(event.content.is_empty());

        let dir = TempDir::new().unwrap();
        let path = write_session(
            &dir,
            "bare.jsonl",
            &[
                r#"{"type":"user","sessionId":"s","cwd":"/repo","timestamp":"2025-10-27T12:00:00Z"}"#,
                r#"{"type":"assistant","timestamp":"2025-10-27T12:00:05Z","message":null}"#,
            ],
        );

        let meta = ClaudeParser.read_session_meta(&path).unwrap();
        assert_eq!(meta.id, "s");
        assert_eq!(meta.cwd, "/repo");

        let mut count = 0;
        ClaudeParser
            .iterate_events(&path, &mut |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.jsonl");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"{\"type\":\"user\",\"message\":{\"content\":\"\xff\"}}\n");
        bytes.extend_from_slice(
            br#"{"type":"assistant","timestamp":"2025-10-27T12:00:05Z","message":{"content":"two"}}"#,
        );
        std::fs::write(&path, bytes).unwrap();

        let mut texts = Vec::new();
        ClaudeParser
            .iterate_events(&path, &mut |event| {
                texts.push(event.content[0].text.clone());
                Ok(())
            })
            .unwrap();
        assert_eq!(texts, vec!["two"]);
    }

    #[test]
    fn test_read_session_meta_skips_undated_records() {
        let dir = TempDir::new().unwrap();
        let path = write_session(
            &dir,
            "7f3e.jsonl",
            &[
                r#"{"type":"summary","summary":"Earlier work","leafUuid":"l1"}"#,
                r#"{"type":"user","cwd":"/repo","version":"2.0.1","timestamp":"2025-10-27T12:00:00Z","message":{"role":"user","content":"hi"}}"#,
            ],
        );

        let meta = ClaudeParser.read_session_meta(&path).unwrap();
        assert_eq!(meta.id, "7f3e");
        assert_eq!(meta.cwd, "/repo");
        assert_eq!(
            meta.source,
            SessionSource::Claude {
                version: "2.0.1".to_string()
            }
        );
    }

    #[test]
    fn test_read_session_meta_not_found() {
        let dir = TempDir::new().unwrap();
        let path = write_session(&dir, "empty.jsonl", &["{broken"]);
        let err = ClaudeParser.read_session_meta(&path).unwrap_err();
        assert!(matches!(err, Error::SessionMetaNotFound));
    }

    #[test]
    fn test_first_user_summary_prefers_user_over_summary_record() {
        let dir = TempDir::new().unwrap();
        let path = write_session(
            &dir,
            "s.jsonl",
            &[
                r#"{"type":"summary","summary":"Earlier work","leafUuid":"l1"}"#,
                r#"{"type":"user","isMeta":true,"timestamp":"2025-10-27T12:00:00Z","message":{"role":"user","content":"Caveat: local command output"}}"#,
                r#"{"type":"user","timestamp":"2025-10-27T12:00:01Z","message":{"role":"user","content":"Explain the build"}}"#,
                r#"{"type":"assistant","timestamp":"2025-10-27T12:01:00Z","message":{"role":"assistant","content":"Sure"}}"#,
            ],
        );

        let summary = ClaudeParser.first_user_summary(&path).unwrap();
        assert_eq!(summary.text, "Explain the build");
        assert_eq!(summary.message_count, 3);
        assert_eq!(
            summary.last_timestamp.map(|ts| ts.to_rfc3339()),
            Some("2025-10-27T12:01:00+00:00".to_string())
        );
    }

    #[test]
    fn test_first_user_summary_falls_back_to_summary_record() {
        let dir = TempDir::new().unwrap();
        let path = write_session(
            &dir,
            "s.jsonl",
            &[
                r#"{"type":"summary","summary":"Earlier work","leafUuid":"l1"}"#,
                r#"{"type":"assistant","timestamp":"2025-10-27T12:01:00Z","message":{"role":"assistant","content":"Sure"}}"#,
            ],
        );

        let summary = ClaudeParser.first_user_summary(&path).unwrap();
        assert_eq!(summary.text, "Earlier work");
        assert_eq!(summary.message_count, 1);
    }
}
