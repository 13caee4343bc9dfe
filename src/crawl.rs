//! Filesystem crawling: walks a root path and emits [`FileEntry`] values
//! honoring the depth, symlink, cross-filesystem, leaf-dir, empty-dir,
//! and unreadable-directory policies in [`Options`].
//!
//! # Streaming shape
//!
//! A single `walkdir::WalkDir` iterator (pre-order, `sort_by_file_name`)
//! drives a stack of open-directory bookkeeping records ([`DirFrame`]).
//! A frame finalizes — triggering whatever policy-driven emission applies
//! (leaf aggregate, empty-dir placeholder, depth-boundary aggregate, or
//! nothing) — as soon as a later entry at or above its own depth is
//! observed, and at end of iteration for the last open chain. This keeps
//! the crawl a single streaming pass whose resident memory is bounded by
//! tree depth (plus, when `-D` is active, the direct children of
//! whichever directories are still open — leaf-ness can't be decided
//! until every sibling has been seen).
//!
//! # Symlink cycles
//!
//! `follow_symlinks` is passed straight through to `WalkDir::follow_links`
//! with no cycle detection layered on top. A symlink cycle with `-l` set
//! will loop until the OS's open-file-descriptor or path-depth limit
//! intervenes. This is a deliberate choice, not an oversight: detecting
//! cycles would mean tracking every visited inode, which conflicts with
//! the depth-bounded memory property above.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::entry::{EntrySink, FileEntry};
use crate::error::PartError;
use crate::options::Options;

/// Per-open-directory bookkeeping. Finalized (and dropped) as soon as
/// the crawl moves past its subtree.
struct DirFrame {
    path: PathBuf,
    depth: usize,
    /// Buffered direct-child file entries, only populated when `-D` is
    /// active and this frame's leaf status is still undecided.
    direct_files: Vec<(PathBuf, u64)>,
    direct_file_sum: u64,
    recursive_file_sum: u64,
    recursive_file_count: u64,
    has_subdir: bool,
    /// True once this frame's depth reaches the configured `-d` boundary.
    is_depth_boundary: bool,
    /// True if an ancestor is already aggregating this subtree (a
    /// `-d` boundary further up the stack); when true, this frame emits
    /// nothing of its own at finalize — it only contributes sums upward.
    suppressed: bool,
}

impl DirFrame {
    fn new(path: PathBuf, depth: usize, parent: Option<&DirFrame>, options: &Options) -> Self {
        let parent_suppressed = parent.map(|p| p.suppressed || p.is_depth_boundary).unwrap_or(false);
        let is_depth_boundary = !parent_suppressed
            && options
                .dir_depth
                .map(|d| depth >= d)
                .unwrap_or(false);
        DirFrame {
            path,
            depth,
            direct_files: Vec::new(),
            direct_file_sum: 0,
            recursive_file_sum: 0,
            recursive_file_count: 0,
            has_subdir: false,
            is_depth_boundary,
            suppressed: parent_suppressed,
        }
    }
}

/// Crawls `root`, pushing emitted entries into `sink`.
pub fn crawl_root<S: EntrySink>(
    root: &Path,
    sink: &mut S,
    options: &Options,
) -> Result<(), PartError> {
    let metadata = std::fs::symlink_metadata(root)
        .map_err(|_| PartError::PathNotFound(root.to_path_buf()))?;

    if !metadata.is_dir() {
        let size = metadata.len();
        sink.accept(FileEntry::file(root.to_path_buf(), size))?;
        return Ok(());
    }

    let walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .same_file_system(!options.cross_fs)
        .sort_by_file_name();

    let mut stack: Vec<DirFrame> = Vec::new();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                if options.dnr_empty {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    log::warn!("unreadable directory treated as empty: {}", path.display());
                    // This directory's own `DirFrame` was already pushed when
                    // its `DirEntry` came through as `Ok` (walkdir emits a
                    // directory, then fails to descend into it). Drop that
                    // frame without finalizing it, or `finalize_frame` would
                    // emit a second synthetic entry for the same path.
                    if stack.last().map(|f| f.path == path).unwrap_or(false) {
                        stack.pop();
                    }
                    sink.accept(FileEntry::synthetic_dir(path, 0))?;
                    continue;
                }
                return Err(err.into());
            }
        };

        let depth = entry.depth();

        while let Some(top) = stack.last() {
            if top.depth >= depth {
                let frame = stack.pop().unwrap();
                finalize_frame(frame, sink, options)?;
            } else {
                break;
            }
        }

        if entry.file_type().is_dir() {
            if depth > 0 {
                if let Some(parent) = stack.last_mut() {
                    parent.has_subdir = true;
                }
            }
            let parent_ref = stack.last();
            let frame = DirFrame::new(entry.path().to_path_buf(), depth, parent_ref, options);
            stack.push(frame);
        } else {
            let raw_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            record_file(&mut stack, entry.path().to_path_buf(), raw_size, sink, options)?;
        }
    }

    while let Some(frame) = stack.pop() {
        finalize_frame(frame, sink, options)?;
    }

    Ok(())
}

fn record_file<S: EntrySink>(
    stack: &mut [DirFrame],
    path: PathBuf,
    raw_size: u64,
    sink: &mut S,
    options: &Options,
) -> Result<(), PartError> {
    for frame in stack.iter_mut() {
        frame.recursive_file_sum += raw_size;
        frame.recursive_file_count += 1;
    }

    let Some(top) = stack.last_mut() else {
        // No open directory (shouldn't happen for a real WalkDir run, but
        // stay defensive): emit the file directly.
        sink.accept(FileEntry::file(path, raw_size))?;
        return Ok(());
    };
    top.direct_file_sum += raw_size;

    if top.suppressed || top.is_depth_boundary {
        // Rolled into an aggregate entry at finalize; never emitted on its own.
        return Ok(());
    }

    if options.leaf_dirs {
        // Leaf status unknown until this frame closes.
        top.direct_files.push((path, raw_size));
    } else {
        sink.accept(FileEntry::file(path, raw_size))?;
    }

    Ok(())
}

fn finalize_frame<S: EntrySink>(
    frame: DirFrame,
    sink: &mut S,
    options: &Options,
) -> Result<(), PartError> {
    if frame.suppressed {
        return Ok(());
    }

    if frame.is_depth_boundary {
        sink.accept(FileEntry::synthetic_dir(frame.path, frame.recursive_file_sum))?;
        return Ok(());
    }

    if options.leaf_dirs && !frame.has_subdir {
        sink.accept(FileEntry::synthetic_dir(frame.path, frame.direct_file_sum))?;
        return Ok(());
    }

    for (path, size) in frame.direct_files {
        sink.accept(FileEntry::file(path, size))?;
    }

    if options.empty_dirs && frame.recursive_file_count == 0 {
        sink.accept(FileEntry::synthetic_dir(frame.path, 0))?;
    }

    Ok(())
}
