use crate::config::{Config, resolve_sessions_dir};
use agentlog_providers::{SessionParser, create_parser, resolve_session_path};
use agentlog_types::AgentKind;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved agent, parser and sessions directory shared by every command
pub struct AppContext {
    pub agent: AgentKind,
    pub config: Config,
    sessions_dir: PathBuf,
    parser: Box<dyn SessionParser>,
}

impl AppContext {
    /// Agent: flag or `AGENTLOG_AGENT`, then config, then Claude Code
    pub fn new(agent: Option<AgentKind>, sessions_dir: Option<&Path>, config: Config) -> Result<Self> {
        let agent = agent.or(config.agent).unwrap_or_default();
        let sessions_dir = resolve_sessions_dir(sessions_dir, &config, agent)?;
        debug!(%agent, sessions_dir = %sessions_dir.display(), "resolved context");

        Ok(Self {
            agent,
            config,
            sessions_dir,
            parser: create_parser(agent),
        })
    }

    pub fn parser(&self) -> &dyn SessionParser {
        self.parser.as_ref()
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    /// Map a path, relative file name, id or id prefix to a session file
    pub fn resolve_session(&self, arg: &str) -> Result<PathBuf> {
        if arg.trim().is_empty() {
            bail!("session identifier is empty");
        }
        let path = resolve_session_path(self.parser(), &self.sessions_dir, arg)?;
        debug!(path = %path.display(), "resolved session");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionsDirConfig;

    #[test]
    fn test_agent_precedence() {
        let config = Config {
            agent: Some(AgentKind::Codex),
            sessions_dir: SessionsDirConfig {
                codex: Some("/codex".to_string()),
                claude: Some("/claude".to_string()),
            },
            ..Default::default()
        };

        let from_config = AppContext::new(None, None, config.clone()).unwrap();
        assert_eq!(from_config.agent, AgentKind::Codex);
        assert_eq!(from_config.parser().agent(), AgentKind::Codex);
        assert_eq!(from_config.sessions_dir(), Path::new("/codex"));

        let from_flag = AppContext::new(Some(AgentKind::Claude), None, config).unwrap();
        assert_eq!(from_flag.agent, AgentKind::Claude);
        assert_eq!(from_flag.sessions_dir(), Path::new("/claude"));
    }

    #[test]
    fn test_empty_session_identifier() {
        let ctx = AppContext::new(Some(AgentKind::Codex), Some(Path::new("/nowhere")), Config::default())
            .unwrap();
        let err = ctx.resolve_session("  ").unwrap_err();
        assert_eq!(err.to_string(), "session identifier is empty");
    }
}
