use agentlog_types::{SessionMeta, SessionSummary, clip_text};
use chrono::{DateTime, Utc};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::traits::SessionParser;
use crate::{Error, Result};

/// Options for [`list_sessions`]
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub root: PathBuf,
    /// Working directory filter; `None` lists every session
    pub cwd: Option<String>,
    /// Require `cwd` to match exactly instead of as a prefix
    pub exact_cwd: bool,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    /// Clip summaries to this many code points
    pub max_summary: Option<usize>,
}

/// Sessions that could be read, plus one warning per file that could not
#[derive(Debug, Default)]
pub struct ListResult {
    pub summaries: Vec<SessionSummary>,
    pub warnings: Vec<ListWarning>,
}

/// A file skipped during listing
#[derive(Debug)]
pub struct ListWarning {
    pub path: PathBuf,
    pub stage: &'static str,
    pub error: Error,
}

impl std::fmt::Display for ListWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.stage, self.path.display(), self.error)
    }
}

fn is_session_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jsonl")
}

/// Walk `root` for session files, stopping early when `visit` breaks.
///
/// Traversal errors are handed to `on_error` and do not end the walk.
fn walk_sessions<B>(
    root: &Path,
    mut on_error: impl FnMut(walkdir::Error),
    mut visit: impl FnMut(&Path) -> ControlFlow<B>,
) -> Option<B> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                on_error(err);
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_session_file(entry.path()) {
            continue;
        }
        if let ControlFlow::Break(found) = visit(entry.path()) {
            return Some(found);
        }
    }
    None
}

fn matches_filters(meta: &SessionMeta, options: &ListOptions) -> bool {
    if let Some(cwd) = options.cwd.as_deref().filter(|cwd| !cwd.is_empty()) {
        let matched = if options.exact_cwd {
            meta.cwd == cwd
        } else {
            meta.cwd.starts_with(cwd)
        };
        if !matched {
            return false;
        }
    }
    if options.after.is_some_and(|after| meta.started_at < after) {
        return false;
    }
    if options.before.is_some_and(|before| meta.started_at > before) {
        return false;
    }
    true
}

/// Enumerate sessions under `options.root`, newest first.
///
/// Files whose header or summary cannot be read become warnings; only a
/// missing root fails the whole listing.
pub fn list_sessions(parser: &dyn SessionParser, options: &ListOptions) -> Result<ListResult> {
    if !options.root.is_dir() {
        return Err(Error::Open {
            path: options.root.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "sessions directory does not exist",
            ),
        });
    }

    let mut result = ListResult::default();
    let mut walk_errors = Vec::new();

    walk_sessions::<()>(
        &options.root,
        |err| walk_errors.push(err),
        |path| {
            let meta = match parser.read_session_meta(path) {
                Ok(meta) => meta,
                Err(error) => {
                    result.warnings.push(ListWarning {
                        path: path.to_path_buf(),
                        stage: "parse meta",
                        error,
                    });
                    return ControlFlow::Continue(());
                }
            };
            if !matches_filters(&meta, options) {
                return ControlFlow::Continue(());
            }

            let mut user = match parser.first_user_summary(path) {
                Ok(user) => user,
                Err(error) => {
                    result.warnings.push(ListWarning {
                        path: path.to_path_buf(),
                        stage: "extract summary",
                        error,
                    });
                    return ControlFlow::Continue(());
                }
            };
            if let Some(max) = options.max_summary.filter(|max| *max > 0) {
                user.text = clip_text(&user.text, max);
            }

            result.summaries.push(SessionSummary::new(meta, user));
            ControlFlow::Continue(())
        },
    );

    for err in walk_errors {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        result.warnings.push(ListWarning {
            path,
            stage: "walk",
            error: Error::WalkDir(err),
        });
    }
    for warning in &result.warnings {
        debug!(path = %warning.path.display(), stage = warning.stage, "skipping session file");
    }

    result
        .summaries
        .sort_by(|a, b| b.started_at.cmp(&a.started_at));
    if let Some(limit) = options.limit.filter(|limit| *limit > 0) {
        result.summaries.truncate(limit);
    }
    Ok(result)
}

/// Find the session file whose id is `id`, or uniquely starts with it.
///
/// The walk stops at the first exact match. Files that cannot be read are
/// ignored.
pub fn find_session_path(parser: &dyn SessionParser, root: &Path, id: &str) -> Result<PathBuf> {
    let mut prefix_matches: Vec<(String, PathBuf)> = Vec::new();

    let exact = walk_sessions(
        root,
        |err| debug!(error = %err, "walk error while searching sessions"),
        |path| {
            let Ok(meta) = parser.read_session_meta(path) else {
                return ControlFlow::Continue(());
            };
            if meta.id == id {
                return ControlFlow::Break(path.to_path_buf());
            }
            if meta.id.starts_with(id) {
                prefix_matches.push((meta.id, path.to_path_buf()));
            }
            ControlFlow::Continue(())
        },
    );

    if let Some(path) = exact {
        return Ok(path);
    }
    match prefix_matches.len() {
        0 => Err(Error::SessionNotFound {
            id: id.to_string(),
            root: root.to_path_buf(),
        }),
        1 => Ok(prefix_matches.remove(0).1),
        _ => Err(Error::AmbiguousSession {
            id: id.to_string(),
            matches: prefix_matches.into_iter().map(|(id, _)| id).collect(),
        }),
    }
}

/// Resolve a user argument to a session file.
///
/// Order: an existing path, a file relative to `root`, then an id lookup.
pub fn resolve_session_path(parser: &dyn SessionParser, root: &Path, arg: &str) -> Result<PathBuf> {
    let direct = Path::new(arg);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }
    let relative = root.join(arg);
    if relative.is_file() {
        return Ok(relative);
    }
    find_session_path(parser, root, arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codex::CodexParser;
    use std::fs;
    use tempfile::TempDir;

    fn write_codex(dir: &Path, rel: &str, id: &str, started: &str, cwd: &str, prompt: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let lines = [
            format!(
                r#"{{"timestamp":"{started}","type":"session_meta","payload":{{"id":"{id}","timestamp":"{started}","cwd":"{cwd}","originator":"codex_cli_rs","cli_version":"0.46.0"}}}}"#
            ),
            format!(
                r#"{{"timestamp":"{started}","type":"response_item","payload":{{"type":"message","role":"user","content":[{{"type":"input_text","text":"{prompt}"}}]}}}}"#
            ),
        ];
        fs::write(path, lines.join("\n") + "\n").unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_codex(
            dir.path(),
            "2025/01/01/rollout-a.jsonl",
            "aaaa-1111",
            "2025-01-01T10:00:00Z",
            "/work/alpha",
            "first prompt",
        );
        write_codex(
            dir.path(),
            "2025/01/02/rollout-b.jsonl",
            "aaaa-2222",
            "2025-01-02T10:00:00Z",
            "/work/beta",
            "second prompt that is rather long",
        );
        write_codex(
            dir.path(),
            "2025/01/03/rollout-c.jsonl",
            "bbbb-3333",
            "2025-01-03T10:00:00Z",
            "/work/alpha",
            "third prompt",
        );
        fs::write(dir.path().join("2025/01/03/notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("2025/01/03/broken.jsonl"), "{oops\n").unwrap();
        dir
    }

    #[test]
    fn test_list_sessions_sorted_newest_first_with_warnings() {
        let dir = fixture();
        let options = ListOptions {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };

        let result = list_sessions(&CodexParser, &options).unwrap();
        let ids: Vec<&str> = result.summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["bbbb-3333", "aaaa-2222", "aaaa-1111"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].stage, "parse meta");
        assert!(result.warnings[0].path.ends_with("broken.jsonl"));
        assert_eq!(result.summaries[0].summary, "third prompt");
        assert_eq!(result.summaries[0].message_count, 1);
    }

    #[test]
    fn test_list_sessions_filters() {
        let dir = fixture();
        let options = ListOptions {
            root: dir.path().to_path_buf(),
            cwd: Some("/work/alpha".to_string()),
            exact_cwd: true,
            after: Some("2025-01-02T00:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        let result = list_sessions(&CodexParser, &options).unwrap();
        let ids: Vec<&str> = result.summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["bbbb-3333"]);

        let prefix = ListOptions {
            root: dir.path().to_path_buf(),
            cwd: Some("/work".to_string()),
            before: Some("2025-01-02T12:00:00Z".parse().unwrap()),
            limit: Some(1),
            max_summary: Some(10),
            ..Default::default()
        };
        let result = list_sessions(&CodexParser, &prefix).unwrap();
        assert_eq!(result.summaries.len(), 1);
        assert_eq!(result.summaries[0].id, "aaaa-2222");
        assert_eq!(result.summaries[0].summary, "second pr…");
    }

    #[test]
    fn test_list_sessions_missing_root() {
        let options = ListOptions {
            root: PathBuf::from("/definitely/not/here"),
            ..Default::default()
        };
        assert!(list_sessions(&CodexParser, &options).is_err());
    }

    #[test]
    fn test_find_session_path_exact_and_prefix() {
        let dir = fixture();

        let exact = find_session_path(&CodexParser, dir.path(), "aaaa-2222").unwrap();
        assert!(exact.ends_with("rollout-b.jsonl"));

        let prefix = find_session_path(&CodexParser, dir.path(), "bbbb").unwrap();
        assert!(prefix.ends_with("rollout-c.jsonl"));

        match find_session_path(&CodexParser, dir.path(), "aaaa") {
            Err(Error::AmbiguousSession { matches, .. }) => {
                assert_eq!(matches, vec!["aaaa-1111", "aaaa-2222"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }

        assert!(matches!(
            find_session_path(&CodexParser, dir.path(), "zzzz"),
            Err(Error::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_session_path_prefers_files() {
        let dir = fixture();
        let direct = dir.path().join("2025/01/01/rollout-a.jsonl");

        let resolved =
            resolve_session_path(&CodexParser, dir.path(), direct.to_str().unwrap()).unwrap();
        assert_eq!(resolved, direct);

        let relative =
            resolve_session_path(&CodexParser, dir.path(), "2025/01/01/rollout-a.jsonl").unwrap();
        assert_eq!(relative, direct);

        let by_id = resolve_session_path(&CodexParser, dir.path(), "bbbb-3333").unwrap();
        assert!(by_id.ends_with("rollout-c.jsonl"));
    }
}
