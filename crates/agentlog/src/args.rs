use crate::types::{InfoFormat, ListFormat, LogLevel, SummaryMode, ViewFormat};
use agentlog_types::AgentKind;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agentlog")]
#[command(about = "Browse and render Codex CLI and Claude Code session logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "AGENTLOG_AGENT",
        help = "Log family to read: codex or claude"
    )]
    pub agent: Option<AgentKind>,

    #[arg(
        long,
        global = true,
        env = "AGENTLOG_SESSIONS_DIR",
        help = "Root directory holding session files"
    )]
    pub sessions_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "AGENTLOG_CONFIG",
        help = "Path to config.toml"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List recorded sessions, newest first")]
    List(ListArgs),

    #[command(about = "Render the events of one session")]
    View(ViewArgs),

    #[command(about = "Show metadata and the first prompt of one session")]
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, help = "Only sessions started in this directory (default: current directory)")]
    pub cwd: Option<String>,

    #[arg(long, conflicts_with = "cwd", help = "List sessions from every directory")]
    pub all: bool,

    #[arg(long, help = "Only sessions started at or after this RFC 3339 time")]
    pub after: Option<DateTime<Utc>>,

    #[arg(long, help = "Only sessions started at or before this RFC 3339 time")]
    pub before: Option<DateTime<Utc>>,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value = "table")]
    pub format: ListFormat,

    #[arg(long, help = "Omit the header row")]
    pub no_header: bool,

    #[arg(long, help = "Clip summaries to this many characters")]
    pub summary_width: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    #[arg(help = "Session id, id prefix, or path to a session file")]
    pub session: String,

    #[arg(short = 'E', long = "entry-type", help = "Comma-separated entry kinds, or 'all'")]
    pub entry_types: Option<String>,

    #[arg(short = 'T', long = "payload-type", help = "Comma-separated payload types, or 'all'")]
    pub payload_types: Option<String>,

    #[arg(short = 'M', long = "event-msg-type", help = "Comma-separated event_msg types, or 'all'")]
    pub event_msg_types: Option<String>,

    #[arg(short = 'R', long = "role", help = "Comma-separated roles, or 'all'")]
    pub roles: Option<String>,

    #[arg(long, help = "Show every event; cannot be combined with -E/-T/-M/-R")]
    pub all: bool,

    #[arg(long, help = "Copy the session file verbatim")]
    pub raw: bool,

    #[arg(long, help = "Wrap width for text output; terminal width for chat output")]
    pub wrap: Option<usize>,

    #[arg(long, help = "Keep only the last N matching events")]
    pub max: Option<usize>,

    #[arg(long, default_value = "text")]
    pub format: ViewFormat,

    #[arg(long, help = "Force colored output")]
    pub color: bool,

    #[arg(long, conflicts_with = "color", help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    #[arg(help = "Session id, id prefix, or path to a session file")]
    pub session: String,

    #[arg(long, default_value = "text")]
    pub format: InfoFormat,

    #[arg(long, default_value = "clip", help = "Clip the summary or print it in full")]
    pub summary: SummaryMode,
}
