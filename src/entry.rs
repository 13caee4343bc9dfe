//! Core data structures for representing file entries to be partitioned.
//!
//! This module defines:
//! - [`FileEntry`]: one unit of work (a file, a synthetic directory
//!   aggregate, or a user-supplied `(size, path)` tuple)
//! - [`EntryList`]: the append-only collection entries live in for the
//!   lifetime of a run
//!
//! # Why append-only?
//!
//! The dispatchers never need to remove or reorder entries in place —
//! fixed-N dispatch sorts a separate index array (see [`crate::dispatch::fixed`])
//! and variable-N dispatch walks entries in stream order. Keeping
//! [`EntryList`] push-only means every `FileEntry`'s position is stable
//! for the life of the run, which is what lets [`FileEntry::assign`] be
//! called exactly once per entry.

use std::path::PathBuf;

/// One logical unit to be placed in a partition.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Displayable identifier. Backed by `OsString` on Unix, which permits
    /// any byte sequence except NUL — matching the path invariant without
    /// extra bookkeeping.
    pub path: PathBuf,
    /// Raw cost in bytes, before overload/round-up is applied.
    pub size: u64,
    /// Assigned partition ordinal, or `None` if not yet dispatched.
    pub partition_index: Option<u32>,
    /// Whether this entry is a synthetic placeholder (empty-dir, leaf-dir
    /// aggregate, or depth-boundary aggregate) rather than a real file.
    pub is_synthetic_empty_dir: bool,
    /// Whether this entry represents a directory, for `add_slash` output.
    pub is_dir: bool,
}

impl FileEntry {
    /// Creates a new, unassigned file entry for a real file.
    pub fn file(path: PathBuf, size: u64) -> Self {
        FileEntry {
            path,
            size,
            partition_index: None,
            is_synthetic_empty_dir: false,
            is_dir: false,
        }
    }

    /// Creates a new synthetic directory-aggregate entry (empty-dir,
    /// leaf-dir, or depth-boundary aggregate).
    pub fn synthetic_dir(path: PathBuf, size: u64) -> Self {
        FileEntry {
            path,
            size,
            partition_index: None,
            is_synthetic_empty_dir: true,
            is_dir: true,
        }
    }

    /// Creates a new entry for an `-a` arbitrary `(size, path)` tuple.
    pub fn arbitrary(path: PathBuf, size: u64) -> Self {
        FileEntry {
            path,
            size,
            partition_index: None,
            is_synthetic_empty_dir: false,
            is_dir: false,
        }
    }

    /// Assigns this entry to a partition. Panics if already assigned —
    /// callers own the single dispatch pass and should never call this
    /// twice for the same entry.
    pub fn assign(&mut self, partition: u32) {
        debug_assert!(
            self.partition_index.is_none(),
            "entry assigned to a partition twice"
        );
        self.partition_index = Some(partition);
    }
}

/// An append-only, index-stable collection of [`FileEntry`] values.
#[derive(Debug, Default)]
pub struct EntryList {
    entries: Vec<FileEntry>,
}

impl EntryList {
    /// Creates an empty entry list.
    pub fn new() -> Self {
        EntryList {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, returning its stable index.
    pub fn push(&mut self, entry: FileEntry) -> usize {
        let idx = self.entries.len();
        self.entries.push(entry);
        idx
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrows an entry by its stable index.
    pub fn get(&self, idx: usize) -> &FileEntry {
        &self.entries[idx]
    }

    /// Mutably borrows an entry by its stable index.
    pub fn get_mut(&mut self, idx: usize) -> &mut FileEntry {
        &mut self.entries[idx]
    }

    /// Iterates over `(index, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        self.entries.iter().enumerate()
    }

    /// Indices of entries with `size > 0`, in insertion order.
    pub fn sized_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.size > 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of entries with `size == 0`, in insertion order.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.size == 0)
            .map(|(i, _)| i)
            .collect()
    }
}

/// A trait for components that accept freshly crawled or parsed entries
/// one at a time.
///
/// [`EntryList`] implements this for batch (non-live) dispatch; the live
/// variable-N dispatcher implements it directly so the crawler can stream
/// into it without ever materializing a full [`EntryList`].
pub trait EntrySink {
    fn accept(&mut self, entry: FileEntry) -> Result<(), crate::error::PartError>;
}

impl EntrySink for EntryList {
    fn accept(&mut self, entry: FileEntry) -> Result<(), crate::error::PartError> {
        self.push(entry);
        Ok(())
    }
}
