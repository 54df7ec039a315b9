//! MacTrans CLI Binary
//!
//! Command-line interface for the MacTrans settings store.

use clap::Parser;
use mactrans::logging::init_logging;
use mactrans::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&cli.logging_config())) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let mut context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
