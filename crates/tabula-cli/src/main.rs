mod cli;
mod commands;
mod labels;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Info(args) => commands::info(&cli.record, args),
        Command::Show(args) => commands::show(&cli.record, args),
        Command::Import(args) => commands::import(&cli.record, args),
        Command::Export(args) => commands::export(&cli.record, args),
        Command::Clear => commands::clear(&cli.record),
        Command::Dump => commands::dump(&cli.record),
    }
}
