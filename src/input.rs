//! Input sourcing: reads root paths or `"<size> <path>"` tuples from
//! stdin, a named file, or direct argv tokens, and feeds them into an
//! [`EntrySink`] — either by crawling (plain paths) or by direct parsing
//! (`-a`, arbitrary values).

use std::io::{self, BufRead};
use std::path::PathBuf;

use crate::crawl::crawl_root;
use crate::entry::{EntrySink, FileEntry};
use crate::error::PartError;
use crate::options::{InputSource, Options};

/// Feeds `sink` from the configured input source, per `options`.
///
/// Without `-a`: each line (or argv token) is a root path to crawl.
/// With `-a`: each line is a `"<size> <path>"` tuple; malformed lines are
/// logged via `log::warn!` and skipped rather than treated as fatal.
pub fn ingest<S: EntrySink>(sink: &mut S, options: &Options) -> Result<(), PartError> {
    match &options.input_source {
        InputSource::Argv(tokens) => {
            for token in tokens {
                ingest_line(token, sink, options)?;
            }
            Ok(())
        }
        InputSource::Stdin => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                ingest_line(&line, sink, options)?;
            }
            Ok(())
        }
        InputSource::File(path) => {
            let file = std::fs::File::open(path)?;
            let reader = io::BufReader::new(file);
            for line in reader.lines() {
                let line = line?;
                ingest_line(&line, sink, options)?;
            }
            Ok(())
        }
    }
}

fn ingest_line<S: EntrySink>(
    line: &str,
    sink: &mut S,
    options: &Options,
) -> Result<(), PartError> {
    if options.arbitrary_values {
        match parse_arbitrary_value(line) {
            Some((size, path)) => {
                sink.accept(FileEntry::arbitrary(path, size))?;
            }
            None => {
                log::warn!("malformed arbitrary-value input line, skipping: {line:?}");
            }
        }
        Ok(())
    } else {
        crawl_root(std::path::Path::new(line), sink, options)
    }
}

/// Parses a `"<size> <path>"` line: a non-negative integer size, one or
/// more whitespace characters, then the path to end of line.
///
/// Parsing the size as `u64` rejects negative numbers at the type
/// level — the historical `sscanf("%lld %[^\n]")` parser silently
/// accepted a negative size on field-width overflow; this can't happen
/// here since `u64::from_str` simply fails on a leading `-`.
fn parse_arbitrary_value(line: &str) -> Option<(u64, PathBuf)> {
    let trimmed = line.trim_start();
    let split_at = trimmed.find(char::is_whitespace)?;
    let (size_str, rest) = trimmed.split_at(split_at);
    let size: u64 = size_str.parse().ok()?;
    let path_str = rest.trim_start();
    if path_str.is_empty() {
        return None;
    }
    Some((size, PathBuf::from(path_str)))
}
