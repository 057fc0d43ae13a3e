//! Save command - Move a staged solution into its site directory

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::utils;
use crate::config::Config;
use crate::error::CpsmError;
use crate::git::{Git, SAVE_COMMIT_MESSAGE};
use crate::problem::ProblemPaths;
use crate::process::Launcher;
use crate::prompt::Prompter;

/// What happened to one staged file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Moved to the contained path
    Saved(PathBuf),
    /// Destination existed and the user kept it
    Declined,
}

/// Execute the save command
///
/// The code file and the input file are handled independently: a missing or
/// declined file does not stop the other one from being saved. All failures
/// are reported; the last one is returned.
pub fn execute<R: BufRead, W: Write>(
    config: &Config,
    root: &Path,
    abbrev: &str,
    problem: &str,
    filetype: &str,
    launcher: &dyn Launcher,
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<SaveOutcome>> {
    let paths = ProblemPaths::resolve(config, root, abbrev, problem, filetype)?;
    let git = Git::new(root, launcher);

    let mut files = vec![(&paths.code, config.git_save_code)];
    if !paths.input_is_code() {
        files.push((&paths.input, config.git_save_input));
    }

    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    for (staged, commit) in files {
        match save_file(&paths, root, staged, prompter) {
            Ok(SaveOutcome::Saved(dest)) => {
                if commit {
                    git.commit_file(
                        Path::new(&utils::display_path(root, &dest)),
                        SAVE_COMMIT_MESSAGE,
                    );
                }
                outcomes.push(SaveOutcome::Saved(dest));
            }
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => failures.push(err),
        }
    }

    match failures.pop() {
        None => Ok(outcomes),
        Some(last) => {
            for err in &failures {
                utils::report_error(err);
            }
            Err(last)
        }
    }
}

/// Move one staged file to its saved location, asking before overwriting
fn save_file<R: BufRead, W: Write>(
    paths: &ProblemPaths,
    root: &Path,
    staged: &Path,
    prompter: &mut Prompter<R, W>,
) -> Result<SaveOutcome> {
    if !staged.is_file() {
        let shown = PathBuf::from(utils::display_path(root, staged));
        return Err(CpsmError::MissingFile(shown).into());
    }

    let dest = paths.saved_location(staged);
    let shown = utils::display_path(root, &dest);

    if dest.exists() {
        let question = format!("{} already exists. Overwrite?", shown);
        if !prompter.confirm(&question, false)? {
            println!(
                "{} {}",
                "No action taken for".yellow(),
                utils::display_path(root, staged)
            );
            return Ok(SaveOutcome::Declined);
        }
    }

    utils::move_file(staged, &dest)?;
    println!("{} {}", "Saved:".green(), shown);
    Ok(SaveOutcome::Saved(dest))
}
