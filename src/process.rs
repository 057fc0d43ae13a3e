//! Launching external programs (editor, run commands, git)
//!
//! Every subprocess goes through a [`Launcher`] with an explicit program and
//! argument list. Nothing is handed to a shell, so problem titles and paths
//! are never reinterpreted.
//!
//! Launches are fire-and-forget from the caller's point of view: spawn
//! failures and non-zero exits are logged but not returned.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, instrument, warn};

/// A program to run with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// File connected to the child's stdin instead of the terminal
    pub stdin: Option<PathBuf>,
    /// Working directory of the child
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Build an invocation from a pre-split word list
    ///
    /// Returns `None` for an empty list.
    pub fn from_words<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
            stdin: None,
            cwd: None,
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn stdin_from(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Human-readable command line for logs
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Capability to start external programs
pub trait Launcher {
    /// Run an invocation to completion
    fn launch(&self, invocation: &Invocation);
}

/// Launcher that spawns real processes and waits for them
///
/// stdout and stderr are inherited so the user sees the program's output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    #[instrument(skip_all, fields(program = %invocation.program))]
    fn launch(&self, invocation: &Invocation) {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        if let Some(path) = &invocation.stdin {
            match File::open(path) {
                Ok(file) => {
                    cmd.stdin(Stdio::from(file));
                }
                Err(e) => {
                    warn!(path = %path.display(), err = %e, "cannot open stdin file, skipping command");
                    return;
                }
            }
        }

        debug!(command = %invocation.display(), "spawning");
        match cmd.status() {
            Ok(status) if status.success() => {
                debug!("command finished");
            }
            Ok(status) => {
                warn!(command = %invocation.display(), exit_code = ?status.code(), "command failed");
            }
            Err(e) => {
                warn!(command = %invocation.display(), err = %e, "failed to spawn command");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words() {
        let inv = Invocation::from_words(["vim", "-p"]).unwrap();
        assert_eq!(inv.program, "vim");
        assert_eq!(inv.args, vec!["-p"]);
        assert!(Invocation::from_words(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_builder_and_display() {
        let inv = Invocation::from_words(["git"])
            .unwrap()
            .arg("add")
            .path_arg(Path::new("uva/two sum.cpp"))
            .current_dir("/work");
        assert_eq!(inv.args, vec!["add", "uva/two sum.cpp"]);
        assert_eq!(inv.cwd, Some(PathBuf::from("/work")));
        assert_eq!(inv.display(), "git add uva/two sum.cpp");
    }

    #[test]
    fn test_missing_program_is_not_an_error() {
        let inv = Invocation::from_words(["cpsm-definitely-not-a-real-program"]).unwrap();
        // Logged and ignored
        SystemLauncher.launch(&inv);
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_redirection() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "hello\n").unwrap();

        let inv = Invocation::from_words(["cp", "/dev/stdin"])
            .unwrap()
            .path_arg(&output)
            .stdin_from(&input);
        SystemLauncher.launch(&inv);

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "hello\n");
    }
}
