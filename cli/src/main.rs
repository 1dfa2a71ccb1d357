use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use cursor_rules_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(logging::Logger::new());

    commands::import::run(&args, &log)?;
    Ok(())
}
