//! Manifest emission: renders assigned entries as plain UTF-8 text,
//! one path per line, to whatever sink the output template selects.
//!
//! This is deliberately the opposite of the teacher's colorized
//! tree-renderer: manifests are consumed by other tools (`xargs`,
//! `rsync --files-from`, tape-archival scripts), so the format is
//! fixed and uncolored regardless of whether stdout is a terminal.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::entry::EntryList;
use crate::error::PartError;
use crate::options::OutputTemplate;
use crate::partition::Partition;

/// Formats a single manifest line for `path`, appending `/` when
/// `add_slash` is set and the entry is a directory.
pub fn format_line(path: &Path, is_dir: bool, add_slash: bool) -> String {
    let mut line = path.display().to_string();
    if add_slash && is_dir && !line.ends_with('/') {
        line.push('/');
    }
    line
}

/// Where a partition's manifest lines are written.
pub enum ManifestWriter {
    /// Absent or `"-"` template: every partition writes through stdout.
    SharedStdout,
    /// `T`: partition `i` writes to `T.i`.
    Template(String),
}

impl ManifestWriter {
    pub fn from_template(template: &OutputTemplate) -> Self {
        match template {
            OutputTemplate::Absent | OutputTemplate::Dash => ManifestWriter::SharedStdout,
            OutputTemplate::Path(prefix) => ManifestWriter::Template(prefix.clone()),
        }
    }

    /// Writes `lines` for partition `partition_index`. When
    /// `prefix_ordinal` is set (the `Absent`-template case), each line
    /// is prefixed with the partition ordinal.
    pub fn write_partition(
        &self,
        partition_index: u32,
        lines: &[String],
        prefix_ordinal: bool,
    ) -> Result<(), PartError> {
        match self {
            ManifestWriter::SharedStdout => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                write_lines(&mut lock, partition_index, lines, prefix_ordinal)
            }
            ManifestWriter::Template(prefix) => {
                let filename = format!("{prefix}.{partition_index}");
                let mut file = File::create(&filename)?;
                write_lines(&mut file, partition_index, lines, prefix_ordinal)
            }
        }
    }
}

fn write_lines(
    writer: &mut dyn Write,
    partition_index: u32,
    lines: &[String],
    prefix_ordinal: bool,
) -> Result<(), PartError> {
    for line in lines {
        if prefix_ordinal {
            writeln!(writer, "{partition_index} {line}")?;
        } else {
            writeln!(writer, "{line}")?;
        }
    }
    Ok(())
}

/// Emits every partition's manifest for a batch dispatch run (fixed-N,
/// or non-live variable-N).
pub fn emit_batch(
    partitions: &[Partition],
    entries: &EntryList,
    output_template: &OutputTemplate,
    add_slash: bool,
) -> Result<(), PartError> {
    let writer = ManifestWriter::from_template(output_template);
    let prefix_ordinal = matches!(output_template, OutputTemplate::Absent);

    for partition in partitions {
        let lines: Vec<String> = partition
            .entries
            .iter()
            .map(|&idx| {
                let entry = entries.get(idx);
                format_line(&entry.path, entry.is_dir, add_slash)
            })
            .collect();
        writer.write_partition(partition.index, &lines, prefix_ordinal)?;
    }
    Ok(())
}
