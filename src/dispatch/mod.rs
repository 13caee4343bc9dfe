//! Dispatch algorithms: placing entries into partitions.
//!
//! Two independent strategies, selected by [`crate::options::DispatchMode`]:
//! - [`fixed`]: balanced fixed-N dispatch (longest-processing-time heuristic)
//! - [`variable`]: bounded variable-N dispatch (first-fit with overflow),
//!   shared between batch and live-streaming callers

pub mod fixed;
pub mod variable;
