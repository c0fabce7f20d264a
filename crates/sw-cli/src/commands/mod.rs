//! CLI subcommand implementations.

pub mod report;
pub mod summary;
pub mod util;
