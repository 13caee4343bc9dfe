//! Binary entry point for the partitioning engine CLI.
//!
//! Kept minimal: parse arguments, install the logger, delegate to
//! [`partr::run`], and translate the result into a process exit code.

use std::process;

use clap::Parser;

use partr::cli::CliArgs;
use partr::options::level_filter_for;

fn main() {
    let args = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(level_filter_for(args.verbosity))
        .parse_default_env()
        .init();

    match partr::run(&args) {
        Ok(0) => {
            log::info!("no entries found");
        }
        Ok(_) => {}
        Err(err) => {
            eprintln!("partr: {err}");
            process::exit(1);
        }
    }
}
