//! Stint CLI library.
//!
//! This crate provides the command-line interface for the stint time
//! tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ExportFormat};
pub use config::Config;
