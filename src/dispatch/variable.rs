//! Variable-N dispatch: bounded first-fit with an overflow partition for
//! entries too large to fit any bounded partition.
//!
//! Two callers share the same placement decision ([`decide_placement`]):
//! - [`dispatch_batch`]: operates over a fully materialized [`EntryList`]
//!   (non-live mode); partitions stay in memory until emission.
//! - [`LiveDispatcher`]: implements [`EntrySink`] directly, so the crawler
//!   streams straight into it. Only the currently open partition's lines
//!   are held in memory; a closed partition is flushed and hook-invoked
//!   immediately, per [`crate::hooks`]. The overflow partition (by
//!   convention emitted last, at the highest ordinal) is the one
//!   exception: its final ordinal isn't known until the stream ends, so
//!   its lines are held until [`LiveDispatcher::finish`] runs.

use crate::entry::{EntryList, EntrySink, FileEntry};
use crate::error::PartError;
use crate::hooks::{run_hook, HookEnv};
use crate::options::{OutputTemplate, Options};
use crate::output::{format_line, ManifestWriter};
use crate::partition::Partition;
use crate::sizing::effective_size;

/// What should happen to the entry currently being placed.
#[derive(Debug, PartialEq, Eq)]
enum Placement {
    /// Too large for any bounded partition: goes to the overflow partition.
    Overflow,
    /// Fits in the currently open partition.
    Fits,
    /// Does not fit; the open partition (if any) must close first.
    NeedsNewPartition,
}

/// Decides where `eff` should go, given the state of the currently open
/// partition (if one exists) and the configured caps.
fn decide_placement(
    has_current: bool,
    current_size: u64,
    current_count: u32,
    eff: u64,
    max_entries: Option<u32>,
    max_size: Option<u64>,
    preload_size: u64,
) -> Placement {
    if let Some(cap) = max_size {
        if eff > cap {
            return Placement::Overflow;
        }
    }

    if !has_current {
        return Placement::NeedsNewPartition;
    }

    let size_ok = max_size
        .map(|cap| current_size + eff <= preload_size + cap)
        .unwrap_or(true);
    let count_ok = max_entries.map(|cap| current_count < cap).unwrap_or(true);

    if size_ok && count_ok {
        Placement::Fits
    } else {
        Placement::NeedsNewPartition
    }
}

/// Non-live variable-N dispatch over an already-populated [`EntryList`].
/// Assigns every entry's `partition_index` in place and returns the
/// resulting partitions in emission order (overflow, if used, last).
pub fn dispatch_batch(
    entries: &mut EntryList,
    max_entries: Option<u32>,
    max_size: Option<u64>,
    options: &Options,
) -> Vec<Partition> {
    let mut closed: Vec<Partition> = Vec::new();
    let mut current: Option<Partition> = None;
    let mut overflow: Option<Partition> = None;
    let mut next_ordinal: u32 = 0;

    for idx in 0..entries.len() {
        let eff = effective_size(
            entries.get(idx).size,
            options.overload_size,
            options.round_size,
        );

        let (has_current, current_size, current_count) = match &current {
            Some(p) => (true, p.current_size, p.current_count),
            None => (false, 0, 0),
        };

        match decide_placement(
            has_current,
            current_size,
            current_count,
            eff,
            max_entries,
            max_size,
            options.preload_size,
        ) {
            Placement::Overflow => {
                let partition = overflow.get_or_insert_with(|| Partition::new(0, options.preload_size));
                partition.add(idx, eff);
                // Final ordinal (and entry assignment) deferred until it's known.
            }
            Placement::Fits => {
                let partition = current.as_mut().expect("decide_placement guarantees Some");
                partition.add(idx, eff);
                entries.get_mut(idx).assign(partition.index);
            }
            Placement::NeedsNewPartition => {
                if let Some(p) = current.take() {
                    closed.push(p);
                }
                let mut partition = Partition::new(next_ordinal, options.preload_size);
                next_ordinal += 1;
                partition.add(idx, eff);
                entries.get_mut(idx).assign(partition.index);
                current = Some(partition);
            }
        }
    }

    if let Some(p) = current.take() {
        closed.push(p);
    }

    if let Some(mut p) = overflow {
        p.index = next_ordinal;
        for &idx in &p.entries {
            entries.get_mut(idx).assign(p.index);
        }
        closed.push(p);
    }

    closed
}

/// Streaming live-mode variable-N dispatcher. Implements [`EntrySink`] so
/// the crawler (or input ingest) can feed it directly without ever
/// materializing a full [`EntryList`].
pub struct LiveDispatcher<'a> {
    options: &'a Options,
    writer: ManifestWriter,
    max_entries: Option<u32>,
    max_size: Option<u64>,
    next_ordinal: u32,
    current: Option<LivePartition>,
    overflow: Option<LivePartition>,
    partitions_created: u32,
}

struct LivePartition {
    index: u32,
    current_size: u64,
    current_count: u32,
    lines: Vec<String>,
}

impl LivePartition {
    fn new(index: u32, preload_size: u64) -> Self {
        LivePartition {
            index,
            current_size: preload_size,
            current_count: 0,
            lines: Vec::new(),
        }
    }

    fn add(&mut self, line: String, eff: u64) {
        self.lines.push(line);
        self.current_size += eff;
        self.current_count += 1;
    }
}

impl<'a> LiveDispatcher<'a> {
    pub fn new(options: &'a Options, max_entries: Option<u32>, max_size: Option<u64>) -> Self {
        LiveDispatcher {
            options,
            writer: ManifestWriter::from_template(&options.output_template),
            max_entries,
            max_size,
            next_ordinal: 0,
            current: None,
            overflow: None,
            partitions_created: 0,
        }
    }

    fn partition_filename(&self, index: u32) -> String {
        match &self.options.output_template {
            OutputTemplate::Path(prefix) => format!("{prefix}.{index}"),
            OutputTemplate::Absent | OutputTemplate::Dash => String::new(),
        }
    }

    fn open_partition(&mut self, index: u32) -> Result<LivePartition, PartError> {
        if let Some(hook) = &self.options.pre_part_hook {
            let env = HookEnv {
                part_number: index,
                part_filename: self.partition_filename(index),
                part_size: self.options.preload_size,
                part_num_files: None,
                part_errno: 0,
            };
            run_hook(hook, &env)?;
        }
        self.partitions_created += 1;
        Ok(LivePartition::new(index, self.options.preload_size))
    }

    fn close_partition(&mut self, partition: LivePartition) -> Result<(), PartError> {
        let prefix_ordinal = matches!(self.options.output_template, OutputTemplate::Absent);
        self.writer
            .write_partition(partition.index, &partition.lines, prefix_ordinal)?;

        if let Some(hook) = &self.options.post_part_hook {
            let env = HookEnv {
                part_number: partition.index,
                part_filename: self.partition_filename(partition.index),
                part_size: partition.current_size,
                part_num_files: Some(partition.current_count),
                part_errno: 0,
            };
            run_hook(hook, &env)?;
        }
        Ok(())
    }

    /// Closes any still-open current partition and flushes the overflow
    /// partition (assigning it the final ordinal), running hooks for
    /// both. Returns the total number of partitions created.
    pub fn finish(mut self) -> Result<u32, PartError> {
        if let Some(p) = self.current.take() {
            self.close_partition(p)?;
        }
        if let Some(mut p) = self.overflow.take() {
            p.index = self.next_ordinal;
            let opened = self.open_partition(p.index)?;
            // The overflow partition's pre-hook fires with the right
            // ordinal, but its entries were already accumulated; merge
            // the preload-only `opened` partition's charge is already
            // reflected in `p` (constructed with the same preload_size).
            let _ = opened;
            self.close_partition(p)?;
        }
        Ok(self.partitions_created)
    }
}

impl<'a> EntrySink for LiveDispatcher<'a> {
    fn accept(&mut self, entry: FileEntry) -> Result<(), PartError> {
        let eff = effective_size(entry.size, self.options.overload_size, self.options.round_size);
        let line = format_line(&entry.path, entry.is_dir, self.options.add_slash);

        let (has_current, current_size, current_count) = match &self.current {
            Some(p) => (true, p.current_size, p.current_count),
            None => (false, 0, 0),
        };

        match decide_placement(
            has_current,
            current_size,
            current_count,
            eff,
            self.max_entries,
            self.max_size,
            self.options.preload_size,
        ) {
            Placement::Overflow => {
                let preload = self.options.preload_size;
                let partition = self
                    .overflow
                    .get_or_insert_with(|| LivePartition::new(0, preload));
                partition.add(line, eff);
            }
            Placement::Fits => {
                let partition = self.current.as_mut().expect("decide_placement guarantees Some");
                partition.add(line, eff);
            }
            Placement::NeedsNewPartition => {
                if let Some(p) = self.current.take() {
                    self.close_partition(p)?;
                }
                let index = self.next_ordinal;
                self.next_ordinal += 1;
                let mut partition = self.open_partition(index)?;
                partition.add(line, eff);
                self.current = Some(partition);
            }
        }
        Ok(())
    }
}
