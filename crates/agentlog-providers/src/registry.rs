use agentlog_types::AgentKind;

use crate::Result;
use crate::claude::ClaudeParser;
use crate::codex::CodexParser;
use crate::traits::SessionParser;

/// Create the parser for an agent family
pub fn create_parser(agent: AgentKind) -> Box<dyn SessionParser> {
    match agent {
        AgentKind::Codex => Box::new(CodexParser),
        AgentKind::Claude => Box::new(ClaudeParser),
    }
}

/// Create a parser from a user-supplied agent name
pub fn create_parser_by_name(name: &str) -> Result<Box<dyn SessionParser>> {
    let agent: AgentKind = name.parse()?;
    Ok(create_parser(agent))
}
