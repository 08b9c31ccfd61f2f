//! Name index derived from the data file.
//!
//! This module provides:
//! - `IndexEntry` line encoding (`name,id`)
//! - `IndexBuilder`, which regenerates the whole index file from the data file

mod builder;
mod entry;

pub use builder::IndexBuilder;
pub use entry::IndexEntry;
