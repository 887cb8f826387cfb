use crate::args::InfoArgs;
use crate::context::AppContext;
use crate::render::{SessionInfo, write_info_text};
use crate::types::InfoFormat;
use agentlog_types::Event;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::{self, Write};

pub fn handle(ctx: &AppContext, args: InfoArgs) -> Result<()> {
    let path = ctx.resolve_session(&args.session)?;
    let parser = ctx.parser();

    let meta = parser.read_session_meta(&path)?;
    let user = parser.first_user_summary(&path)?;

    let mut count = 0usize;
    let mut last: Option<DateTime<Utc>> = None;
    parser.iterate_events(&path, &mut |event: &Event| {
        count += 1;
        if let Some(ts) = event.timestamp
            && last.is_none_or(|last| ts > last)
        {
            last = Some(ts);
        }
        Ok(())
    })?;

    let info = SessionInfo::new(meta, user.text, count, last);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        InfoFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?,
        InfoFormat::Text => write_info_text(&mut out, &info, args.summary)?,
    }
    out.flush()?;
    Ok(())
}
