//! cpsm library
//!
//! Core functionality for managing competitive programming solution files:
//! configuration loading, path resolution, template rendering and the
//! `init`/`new`/`run`/`save` command handlers.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod problem;
pub mod process;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_support;
