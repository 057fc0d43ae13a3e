//! Git adapter for `init` and `save`.
//!
//! Builds `git` invocations and hands them to a [`Launcher`]. Like every other
//! subprocess, git failures are logged and never abort a command.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::process::{Invocation, Launcher};

/// Commit message used when saving a solution file
pub const SAVE_COMMIT_MESSAGE: &str = "Save solution";

/// Git commands run in a working directory
pub struct Git<'a> {
    workdir: PathBuf,
    launcher: &'a dyn Launcher,
}

impl<'a> Git<'a> {
    pub fn new(workdir: impl Into<PathBuf>, launcher: &'a dyn Launcher) -> Self {
        Self {
            workdir: workdir.into(),
            launcher,
        }
    }

    /// `git init`
    pub fn init(&self) {
        debug!(workdir = %self.workdir.display(), "initializing git repository");
        self.run(&["init"]);
    }

    /// Stage a single file and commit only that file
    pub fn commit_file(&self, path: &Path, message: &str) {
        debug!(path = %path.display(), "committing file");
        let path = path.to_string_lossy();
        self.run(&["add", "--", &path]);
        self.run(&["commit", "-m", message, "--", &path]);
    }

    fn run(&self, args: &[&str]) {
        let invocation = Invocation::from_words(std::iter::once("git").chain(args.iter().copied()))
            .map(|inv| inv.current_dir(&self.workdir));
        if let Some(invocation) = invocation {
            self.launcher.launch(&invocation);
        }
    }
}
