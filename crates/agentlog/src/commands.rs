use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use crate::context::AppContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(cli.agent, cli.sessions_dir.as_deref(), config)?;

    match cli.command {
        Commands::List(args) => handlers::list::handle(&ctx, args),
        Commands::View(args) => handlers::view::handle(&ctx, args),
        Commands::Info(args) => handlers::info::handle(&ctx, args),
    }
}
