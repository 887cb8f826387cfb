#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CODEX_ID: &str = "0199a2b4-7c1e-7d21-9f0a-5b3c2d1e0f11";
pub const CODEX_TOOLS_ID: &str = "0199b000-0000-7000-8000-000000000001";
pub const CLAUDE_ID: &str = "5e1f9a2c-3b4d-4c6e-8f70-1a2b3c4d5e6f";

/// Temporary sessions directory populated from the provider samples
pub struct TestFixture {
    temp_dir: TempDir,
    sessions_dir: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sessions_dir = temp_dir.path().join("sessions");
        fs::create_dir_all(&sessions_dir).expect("Failed to create sessions dir");
        Self {
            temp_dir,
            sessions_dir,
        }
    }

    /// Codex CLI layout: `YYYY/MM/DD/rollout-*.jsonl`
    pub fn codex() -> Self {
        let fixture = Self::new();
        fixture.copy_sample(
            "codex_session.jsonl",
            &format!("2025/10/27/rollout-2025-10-27T12-00-00-{}.jsonl", CODEX_ID),
        );
        fixture.copy_sample(
            "codex_tools_session.jsonl",
            &format!("2025/10/28/rollout-2025-10-28T09-00-00-{}.jsonl", CODEX_TOOLS_ID),
        );
        fixture
    }

    /// Claude Code layout: `<project slug>/<session id>.jsonl`
    pub fn claude() -> Self {
        let fixture = Self::new();
        fixture.copy_sample(
            "claude_session.jsonl",
            &format!("-home-dev-project/{}.jsonl", CLAUDE_ID),
        );
        fixture
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    pub fn sample_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("agentlog-providers/tests/samples")
            .join(name)
    }

    pub fn copy_sample(&self, sample_name: &str, dest: &str) -> PathBuf {
        let dest = self.sessions_dir.join(dest);
        fs::create_dir_all(dest.parent().unwrap()).expect("Failed to create parent dir");
        fs::copy(Self::sample_path(sample_name), &dest).expect("Failed to copy sample");
        dest
    }

    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let dest = self.sessions_dir.join(rel);
        fs::create_dir_all(dest.parent().unwrap()).expect("Failed to create parent dir");
        fs::write(&dest, content).expect("Failed to write file");
        dest
    }

    /// `agentlog` isolated from the caller's environment and config
    pub fn command(&self, agent: &str) -> Command {
        let mut cmd = Command::cargo_bin("agentlog").expect("Failed to find agentlog binary");
        cmd.env("AGENTLOG_CONFIG", self.temp_dir.path().join("config.toml"))
            .env_remove("AGENTLOG_AGENT")
            .env_remove("AGENTLOG_SESSIONS_DIR")
            .env_remove("NO_COLOR")
            .env_remove("PAGER")
            .env_remove("RUST_LOG")
            .arg("--agent")
            .arg(agent)
            .arg("--sessions-dir")
            .arg(&self.sessions_dir);
        cmd
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.temp_dir.path().join("config.toml"), content)
            .expect("Failed to write config");
    }
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run agentlog");
    assert!(
        output.status.success(),
        "agentlog failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}
