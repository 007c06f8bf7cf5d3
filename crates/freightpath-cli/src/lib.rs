//! freightpath CLI library.
//!
//! This crate provides command-line interface utilities for the freightpath
//! route planner: input path resolution, terminal styling and output
//! formatting.

pub mod args;
pub mod output;
pub mod terminal;
