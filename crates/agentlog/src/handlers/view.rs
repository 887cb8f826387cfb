use crate::args::ViewArgs;
use crate::context::AppContext;
use crate::filter::{EventFilter, FilterArgs};
use crate::pager::{Pager, page_lines};
use crate::render::{render_chat_transcript, text_event_lines};
use crate::terminal::{determine_width, resolve_color, stdout_is_terminal};
use crate::types::ViewFormat;
use crate::window::EventRing;
use agentlog_types::Event;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub fn handle(ctx: &AppContext, args: ViewArgs) -> Result<()> {
    let filter = EventFilter::from_args(
        ctx.agent,
        &FilterArgs {
            all: args.all,
            entry_types: args.entry_types.as_deref(),
            payload_types: args.payload_types.as_deref(),
            event_msg_types: args.event_msg_types.as_deref(),
            roles: args.roles.as_deref(),
        },
    )?;

    let path = ctx.resolve_session(&args.session)?;

    if args.raw {
        return copy_file(&path);
    }

    // Reject files that are not sessions of this agent before printing anything
    ctx.parser().read_session_meta(&path)?;

    let max = args.max.filter(|max| *max > 0);
    let wrap = args.wrap.unwrap_or(0);

    match args.format {
        ViewFormat::Text => {
            let color = resolve_color(args.color, args.no_color);
            debug!(color, wrap, "rendering text transcript");
            let mut out = BufWriter::new(io::stdout().lock());
            for_each_selected(ctx, &path, &filter, max, |index, event| {
                if index > 1 {
                    writeln!(out)?;
                }
                for line in text_event_lines(event, index, wrap, color) {
                    writeln!(out, "{}", line)?;
                }
                Ok(())
            })?;
            out.flush()?;
        }
        ViewFormat::Raw => {
            let mut out = BufWriter::new(io::stdout().lock());
            for_each_selected(ctx, &path, &filter, max, |_, event| {
                writeln!(out, "{}", event.raw)?;
                Ok(())
            })?;
            out.flush()?;
        }
        ViewFormat::Chat => {
            let color = resolve_color(args.color, args.no_color);
            let width = determine_width(args.wrap);
            debug!(color, width, "rendering chat transcript");

            let mut events = Vec::new();
            for_each_selected(ctx, &path, &filter, max, |_, event| {
                events.push(event.clone());
                Ok(())
            })?;
            if events.is_empty() {
                return Ok(());
            }

            let lines = render_chat_transcript(&events, width, color);
            if stdout_is_terminal() {
                let pager = Pager::from_env(ctx.config.pager.as_deref(), color);
                return page_lines(&lines, &pager);
            }
            let mut out = BufWriter::new(io::stdout().lock());
            for line in &lines {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

/// Visit the events `filter` accepts, numbered from 1.
///
/// With `max`, only the last `max` accepted events are visited, after the
/// whole file has been read.
fn for_each_selected<F>(
    ctx: &AppContext,
    path: &Path,
    filter: &EventFilter,
    max: Option<usize>,
    mut emit: F,
) -> Result<()>
where
    F: FnMut(usize, &Event) -> agentlog_providers::Result<()>,
{
    let parser = ctx.parser();

    let Some(max) = max else {
        let mut index = 0;
        parser.iterate_events(path, &mut |event: &Event| {
            if !filter.matches(event) {
                return Ok(());
            }
            index += 1;
            emit(index, event)
        })?;
        return Ok(());
    };

    let mut ring = EventRing::new(max);
    parser.iterate_events(path, &mut |event: &Event| {
        if filter.matches(event) {
            ring.push(event.clone());
        }
        Ok(())
    })?;
    for (idx, event) in ring.into_vec().iter().enumerate() {
        emit(idx + 1, event)?;
    }
    Ok(())
}

fn copy_file(path: &Path) -> Result<()> {
    let mut file =
        File::open(path).with_context(|| format!("open session file {}", path.display()))?;
    let mut out = io::stdout().lock();
    io::copy(&mut file, &mut out)?;
    out.flush()?;
    Ok(())
}
