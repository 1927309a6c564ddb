mod bootstrap_helpers;
mod cli_args;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::{Cli, CliCommand};
use crate::commands::{load_config, run_render, run_tabs};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let output = match &cli.command {
        CliCommand::Render(args) => run_render(&config, args)?,
        CliCommand::Tabs => run_tabs(&config)?,
    };
    println!("{output}");
    Ok(())
}
