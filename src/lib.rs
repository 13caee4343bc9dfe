//! Partitions a collection of file entries into groups ("partitions")
//! subject to numeric constraints: either a fixed number of balanced
//! partitions, or an unbounded number of partitions each bounded by a
//! maximum entry count and/or maximum aggregate size.
//!
//! This is the offline planner used to stage bulk file operations —
//! parallel copy, backup sets, tape archival, rsync fan-out — where the
//! input is a filesystem subtree (or a stream of arbitrary `(size, path)`
//! tuples) and the output is N manifest lists whose total sizes are as
//! even as possible, or each under a cap.
//!
//! # Architecture
//!
//! - [`cli`]: raw, unvalidated command-line argument shape
//! - [`options`]: validated, immutable run configuration
//! - [`entry`]: the file-entry record and its append-only collection
//! - [`sizing`]: preload/overload/round-up effective-size accounting
//! - [`crawl`]: the filesystem crawler
//! - [`input`]: stdin/file/argv input sourcing, including `-a` parsing
//! - [`dispatch`]: the fixed-N and variable-N placement algorithms
//! - [`partition`]: the partition (bin) data structure
//! - [`hooks`]: pre/post-partition hook execution for live mode
//! - [`output`]: manifest emission
//! - [`error`]: the crate's error type
//!
//! # Quick Start
//!
//! ```no_run
//! use partr::cli::CliArgs;
//! use clap::Parser;
//!
//! let args = CliArgs::parse_from(["partr", "-n", "4", "-o", "manifest", "/data"]);
//! partr::run(&args).expect("partitioning failed");
//! ```

pub mod cli;
pub mod crawl;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod hooks;
pub mod input;
pub mod options;
pub mod output;
pub mod partition;
pub mod sizing;

use cli::CliArgs;
use entry::EntryList;
use error::PartError;
use options::{DispatchMode, Options};

/// Runs the full partitioning pipeline for one invocation: validates
/// `args`, ingests entries (crawling paths or parsing arbitrary-value
/// tuples), dispatches them to partitions, and emits manifests.
///
/// Returns the number of partitions produced. An empty input is not an
/// error — it's reported via `log::info!` and `0` is returned without
/// writing any manifest, per the "empty result" recovery rule.
pub fn run(args: &CliArgs) -> Result<u32, PartError> {
    let options = Options::from_cli(args)?;

    match options.dispatch_mode.clone() {
        DispatchMode::FixedN(num_parts) => run_fixed(&options, num_parts),
        DispatchMode::Variable { max_entries, max_size } if options.live_mode => {
            run_live(&options, max_entries, max_size)
        }
        DispatchMode::Variable { max_entries, max_size } => {
            run_variable_batch(&options, max_entries, max_size)
        }
    }
}

fn run_fixed(options: &Options, num_parts: u32) -> Result<u32, PartError> {
    let mut entries = EntryList::new();
    input::ingest(&mut entries, options)?;

    if entries.is_empty() {
        log::info!("no entries found; nothing to partition");
        return Ok(0);
    }

    let partitions = dispatch::fixed::dispatch(&mut entries, num_parts, options);
    output::emit_batch(&partitions, &entries, &options.output_template, options.add_slash)?;
    log::info!("wrote {} partitions ({} entries)", partitions.len(), entries.len());
    Ok(partitions.len() as u32)
}

fn run_variable_batch(
    options: &Options,
    max_entries: Option<u32>,
    max_size: Option<u64>,
) -> Result<u32, PartError> {
    let mut entries = EntryList::new();
    input::ingest(&mut entries, options)?;

    if entries.is_empty() {
        log::info!("no entries found; nothing to partition");
        return Ok(0);
    }

    let partitions = dispatch::variable::dispatch_batch(&mut entries, max_entries, max_size, options);
    output::emit_batch(&partitions, &entries, &options.output_template, options.add_slash)?;
    log::info!("wrote {} partitions ({} entries)", partitions.len(), entries.len());
    Ok(partitions.len() as u32)
}

fn run_live(
    options: &Options,
    max_entries: Option<u32>,
    max_size: Option<u64>,
) -> Result<u32, PartError> {
    let mut dispatcher = dispatch::variable::LiveDispatcher::new(options, max_entries, max_size);
    input::ingest(&mut dispatcher, options)?;
    let created = dispatcher.finish()?;

    if created == 0 {
        log::info!("no entries found; nothing to partition");
    } else {
        log::info!("live mode completed with {created} partitions");
    }
    Ok(created)
}
