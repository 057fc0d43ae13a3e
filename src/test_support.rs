//! Test-only helpers

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use crate::config::{config_path, Config};
use crate::process::{Invocation, Launcher};

/// Launcher that records invocations instead of running them
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub launched: RefCell<Vec<Invocation>>,
}

impl RecordingLauncher {
    pub fn invocations(&self) -> Vec<Invocation> {
        self.launched.borrow().clone()
    }

    /// Launched command lines, program first
    pub fn command_lines(&self) -> Vec<Vec<String>> {
        self.launched
            .borrow()
            .iter()
            .map(|inv| {
                std::iter::once(inv.program.clone())
                    .chain(inv.args.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, invocation: &Invocation) {
        self.launched.borrow_mut().push(invocation.clone());
    }
}

/// Configuration used by command tests: `uva` site with a `cpp` template
pub const SAMPLE_CONFIG: &str = r#"
editor = "vim -p"
git_save_code = true

[mappings]
username = "alice"

[abbreviations.uva]
name = "UVa"
dir = "uva"

[templates.cpp]
filetype = "cpp"
body = """
// Author: {{ username }}
// Problem: ({{ name }}) {{ problem_name }}
int main() {}
"""

[run_commands]
py = ["first {{ problem_path }}.py", { cmd = "second {{ problem_name }}", stdin = "{{ problem_path }}.txt" }]
"#;

/// Write `SAMPLE_CONFIG` and `uva/solving/` into `root` and load the config
pub fn sample_workspace(root: &Path) -> Config {
    fs::write(config_path(root), SAMPLE_CONFIG).unwrap();
    fs::create_dir_all(root.join("uva").join("solving")).unwrap();
    Config::load(root).unwrap()
}
