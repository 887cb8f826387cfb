use agentlog_types::{AgentKind, Event, SessionMeta, UserSummary};
use std::path::Path;

use crate::Result;
use crate::scanner::LineScanner;

/// Callback invoked for each decoded event; returning an error stops the scan
pub type EventVisitor<'a> = dyn FnMut(&Event) -> Result<()> + 'a;

/// Decoder for one agent log family.
///
/// Implementations are stateless: every method opens the file, scans
/// forward once and closes it.
pub trait SessionParser: Send + Sync {
    fn agent(&self) -> AgentKind;

    /// Decode one JSONL line from its raw bytes.
    ///
    /// `Ok(None)` marks a line the family chooses to skip; errors are fatal
    /// to the scan that produced them. Bytes that are not UTF-8 are
    /// malformed like any other undecodable line.
    fn decode_line(&self, line: &[u8]) -> Result<Option<Event>>;

    /// Session header from the first qualifying record
    fn read_session_meta(&self, path: &Path) -> Result<SessionMeta>;

    /// First user prompt, message count and last timestamp
    fn first_user_summary(&self, path: &Path) -> Result<UserSummary>;

    /// Stream every event in file order
    fn iterate_events(&self, path: &Path, visit: &mut EventVisitor<'_>) -> Result<()> {
        for line in LineScanner::open(path)? {
            let line = line?;
            let decoded = self
                .decode_line(&line.bytes)
                .map_err(|err| err.at_line(line.number))?;
            if let Some(event) = decoded {
                visit(&event)?;
            }
        }
        Ok(())
    }
}
