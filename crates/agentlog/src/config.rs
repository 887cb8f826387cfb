use agentlog_types::AgentKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sessions directories per agent, overriding the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsDirConfig {
    pub codex: Option<String>,
    pub claude: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agent: Option<AgentKind>,
    pub pager: Option<String>,
    pub summary_width: Option<usize>,
    pub sessions_dir: SessionsDirConfig,
}

impl Config {
    /// Load from the resolved location; a missing file yields defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Config file location:
    /// 1. Explicit path (`--config` or `AGENTLOG_CONFIG`)
    /// 2. `<config dir>/agentlog/config.toml`
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(&path.to_string_lossy()));
        }
        dirs::config_dir().map(|dir| dir.join("agentlog").join("config.toml"))
    }

    pub fn sessions_dir(&self, agent: AgentKind) -> Option<PathBuf> {
        let configured = match agent {
            AgentKind::Codex => self.sessions_dir.codex.as_deref(),
            AgentKind::Claude => self.sessions_dir.claude.as_deref(),
        };
        configured
            .filter(|dir| !dir.trim().is_empty())
            .map(expand_tilde)
    }
}

/// Resolve the sessions directory: flag or environment, then config, then
/// the agent's default under the home directory.
pub fn resolve_sessions_dir(
    explicit: Option<&Path>,
    config: &Config,
    agent: AgentKind,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }
    if let Some(path) = config.sessions_dir(agent) {
        return Ok(path);
    }
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(agent.default_sessions_subdir()))
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
agent = "codex"
pager = "less -SR"
summary_width = 60

[sessions_dir]
codex = "/data/codex"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.agent, Some(AgentKind::Codex));
        assert_eq!(config.pager.as_deref(), Some("less -SR"));
        assert_eq!(config.summary_width, Some(60));
        assert_eq!(
            config.sessions_dir(AgentKind::Codex),
            Some(PathBuf::from("/data/codex"))
        );
        assert_eq!(config.sessions_dir(AgentKind::Claude), None);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "agent = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }

    #[test]
    fn test_resolve_sessions_dir_precedence() {
        let config = Config {
            sessions_dir: SessionsDirConfig {
                codex: Some("/from/config".to_string()),
                claude: None,
            },
            ..Default::default()
        };

        let explicit =
            resolve_sessions_dir(Some(Path::new("/from/flag")), &config, AgentKind::Codex).unwrap();
        assert_eq!(explicit, PathBuf::from("/from/flag"));

        let configured = resolve_sessions_dir(None, &config, AgentKind::Codex).unwrap();
        assert_eq!(configured, PathBuf::from("/from/config"));

        if let Some(home) = dirs::home_dir() {
            let fallback = resolve_sessions_dir(None, &config, AgentKind::Claude).unwrap();
            assert_eq!(fallback, home.join(".claude/projects"));
        }
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/logs"), home.join("logs"));
        }
    }
}
