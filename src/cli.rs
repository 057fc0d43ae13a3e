//! Command line parsing
//!
//! The grammar is a fixed table of modes. Malformed invocations never fail:
//! they produce usage text, printed with exit code 0.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::ffi::OsString;

/// One row of the mode table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSpec {
    pub name: &'static str,
    pub alias: &'static str,
    pub args: &'static [&'static str],
    pub help: &'static str,
}

impl ModeSpec {
    /// `cpsm new abbrev problem template  |  Create a new solution`
    pub fn usage_line(&self) -> String {
        let mut line = format!(" cpsm {}", self.name);
        for arg in self.args {
            line.push(' ');
            line.push_str(arg);
        }
        format!("{line}  |  {}\n", self.help)
    }
}

/// All modes, in usage order
pub static MODES: [ModeSpec; 5] = [
    ModeSpec {
        name: "init",
        alias: "init",
        args: &[],
        help: "Initialize a directory",
    },
    ModeSpec {
        name: "new",
        alias: "n",
        args: &["abbrev", "problem", "template"],
        help: "Create a new solution",
    },
    ModeSpec {
        name: "run",
        alias: "r",
        args: &["abbrev", "problem", "filetype"],
        help: "Run the commands configured for a filetype",
    },
    ModeSpec {
        name: "save",
        alias: "s",
        args: &["abbrev", "problem", "filetype"],
        help: "Save an existing solution",
    },
    ModeSpec {
        name: "help",
        alias: "h",
        args: &[],
        help: "Display this help message",
    },
];

/// Find a mode by name or alias
pub fn lookup(mode: &str) -> Option<&'static ModeSpec> {
    MODES.iter().find(|m| m.name == mode || m.alias == mode)
}

/// Full usage table
pub fn usage() -> String {
    let mut text = String::from("USAGE: cpsm <mode> [args...]\n");
    for mode in &MODES {
        text.push_str(&mode.usage_line());
    }
    text
}

#[derive(Parser, Debug)]
#[command(name = "cpsm", version, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// A validated command
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize a directory
    Init,

    /// Create a new solution
    #[command(alias = "n")]
    New {
        abbrev: String,
        #[arg(allow_hyphen_values = true)]
        problem: String,
        template: String,
    },

    /// Run the commands configured for a filetype
    #[command(alias = "r")]
    Run {
        abbrev: String,
        #[arg(allow_hyphen_values = true)]
        problem: String,
        filetype: String,
    },

    /// Save an existing solution
    #[command(alias = "s")]
    Save {
        abbrev: String,
        #[arg(allow_hyphen_values = true)]
        problem: String,
        filetype: String,
    },

    /// Display this help message
    #[command(alias = "h")]
    Help,
}

/// Result of parsing the argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Command(Command),
    /// Text to print before exiting successfully
    Usage(String),
}

/// Parse the full argument vector, program name included
pub fn parse<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    match Cli::try_parse_from(&args) {
        Ok(Cli {
            command: Command::Help,
        }) => Parsed::Usage(usage()),
        Ok(cli) => Parsed::Command(cli.command),
        Err(err) if err.kind() == ErrorKind::DisplayVersion => Parsed::Usage(err.to_string()),
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "invalid invocation");
            let mode = args
                .get(1)
                .and_then(|arg| arg.to_str())
                .and_then(lookup);
            match mode {
                Some(entry) if entry.name != "help" => Parsed::Usage(entry.usage_line()),
                _ => Parsed::Usage(usage()),
            }
        }
    }
}
