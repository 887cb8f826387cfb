// NOTE: agentlog reads session files in place and never copies or indexes them.
//
// Every command re-parses the file it needs on demand:
// - Provider schemas change without notice; decoding at read time means a
//   decoder fix applies to every existing log immediately
// - Listing keeps going when one file is unreadable and reports it as a
//   warning instead of failing the whole command
// - Codex CLI logs are machine-written, so a malformed line is an error;
//   Claude Code logs interleave bookkeeping records, so bad lines are skipped

mod args;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
mod handlers;
pub mod logging;
pub mod pager;
pub mod render;
pub mod terminal;
pub mod types;
pub mod window;

pub use args::{Cli, Commands, InfoArgs, ListArgs, ViewArgs};
pub use commands::run;
