//! Error types for the partitioning engine.
//!
//! This module defines [`PartError`], the single error type returned by
//! every fallible operation in the crate: crawling, option validation,
//! dispatch, hook execution, and manifest emission.
//!
//! Malformed `-a` input lines are *not* represented here — per the
//! input-error recovery rule, those are logged and skipped rather than
//! propagated as an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for partitioning operations.
#[derive(Debug)]
pub enum PartError {
    /// The specified root path doesn't exist.
    PathNotFound(PathBuf),

    /// Permission denied reading a file or directory.
    PermissionDenied(PathBuf),

    /// Generic I/O error (stat failure, output sink write failure, ...).
    IoError(io::Error),

    /// Error surfaced by the directory iterator during traversal.
    TraversalError(String),

    /// Invalid combination or value of CLI flags, caught before any
    /// filesystem work begins.
    ArgumentError(String),

    /// A pre- or post-partition hook exited with a nonzero status.
    HookFailure { command: String, status: i32 },
}

impl fmt::Display for PartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartError::PathNotFound(path) => {
                write!(f, "path not found: {}", path.display())
            }
            PartError::PermissionDenied(path) => {
                write!(f, "permission denied: {}", path.display())
            }
            PartError::IoError(err) => write!(f, "I/O error: {err}"),
            PartError::TraversalError(msg) => write!(f, "traversal error: {msg}"),
            PartError::ArgumentError(msg) => write!(f, "argument error: {msg}"),
            PartError::HookFailure { command, status } => {
                write!(f, "hook `{command}` exited with status {status}")
            }
        }
    }
}

impl std::error::Error for PartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PartError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PartError {
    fn from(err: io::Error) -> Self {
        PartError::IoError(err)
    }
}

impl From<walkdir::Error> for PartError {
    fn from(err: walkdir::Error) -> Self {
        // walkdir::Error borrows a Path internally and isn't convenient to
        // carry across our sink boundaries, so flatten it at the edge.
        PartError::TraversalError(err.to_string())
    }
}
