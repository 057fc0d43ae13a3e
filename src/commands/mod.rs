//! CLI commands

pub mod init;
pub mod new;
pub mod run;
pub mod save;
pub mod utils;
