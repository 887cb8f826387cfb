use crate::args::ListArgs;
use crate::context::AppContext;
use crate::render::write_summaries;
use agentlog_providers::{ListOptions, list_sessions};
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Summaries are clipped to this many code points unless configured otherwise
const DEFAULT_SUMMARY_WIDTH: usize = 160;

pub fn handle(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let cwd = if args.all {
        None
    } else {
        match args.cwd {
            Some(cwd) => Some(cwd),
            None => Some(
                std::env::current_dir()
                    .context("determine current directory")?
                    .display()
                    .to_string(),
            ),
        }
    };

    let options = ListOptions {
        root: ctx.sessions_dir().to_path_buf(),
        cwd,
        exact_cwd: true,
        after: args.after,
        before: args.before,
        limit: args.limit,
        max_summary: Some(
            args.summary_width
                .or(ctx.config.summary_width)
                .unwrap_or(DEFAULT_SUMMARY_WIDTH),
        ),
    };

    let result = list_sessions(ctx.parser(), &options)?;
    for warning in &result.warnings {
        eprintln!("warning: {}", warning);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summaries(&mut out, &result.summaries, !args.no_header, args.format)?;
    out.flush()?;
    Ok(())
}
