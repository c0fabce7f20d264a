//! Sleep report CLI library.
//!
//! This crate provides the CLI interface and terminal rendering for the sleep report.

mod cli;
pub mod commands;
mod config;
pub mod style;

pub use cli::{Cli, Commands};
pub use config::Config;
