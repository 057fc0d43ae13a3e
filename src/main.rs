//! cpsm: Competitive Programming Solutions Manager
//!
//! Creates, runs and saves per-problem solution and input files, driven by a
//! `cpsm.toml` in the current directory.

use anyhow::{Context, Result};
use std::process::ExitCode;

use cpsm::cli::{self, Command, Parsed};
use cpsm::commands;
use cpsm::config::Config;
use cpsm::exit_codes;
use cpsm::logging;
use cpsm::process::SystemLauncher;
use cpsm::prompt::Prompter;

fn main() -> ExitCode {
    logging::init();

    let command = match cli::parse(std::env::args_os()) {
        Parsed::Usage(text) => {
            print!("{}", text);
            return ExitCode::from(exit_codes::OK);
        }
        Parsed::Command(command) => command,
    };

    match run(command) {
        Ok(()) => ExitCode::from(exit_codes::OK),
        Err(err) => {
            commands::utils::report_error(&err);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run(command: Command) -> Result<()> {
    let root = std::env::current_dir().context("Failed to get current directory")?;
    let launcher = SystemLauncher;

    match command {
        Command::Init => {
            commands::init::execute(&root, &mut Prompter::stdio(), &launcher)?;
        }

        Command::New {
            abbrev,
            problem,
            template,
        } => {
            let config = Config::load(&root)?;
            commands::new::execute(&config, &root, &abbrev, &problem, &template, &launcher)?;
        }

        Command::Run {
            abbrev,
            problem,
            filetype,
        } => {
            let config = Config::load(&root)?;
            commands::run::execute(&config, &root, &abbrev, &problem, &filetype, &launcher)?;
        }

        Command::Save {
            abbrev,
            problem,
            filetype,
        } => {
            let config = Config::load(&root)?;
            commands::save::execute(
                &config,
                &root,
                &abbrev,
                &problem,
                &filetype,
                &launcher,
                &mut Prompter::stdio(),
            )?;
        }

        // Handled by the parser
        Command::Help => print!("{}", cli::usage()),
    }

    Ok(())
}
