//! New command - Create a solution file pair from a template and open it

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::utils;
use crate::config::Config;
use crate::problem::{ProblemPaths, Renderer, Substitutions};
use crate::process::{Invocation, Launcher};

/// Execute the new command
///
/// Existing files are reused as they are, so running `new` again for the same
/// problem just reopens the editor.
pub fn execute(
    config: &Config,
    root: &Path,
    abbrev: &str,
    problem: &str,
    template_key: &str,
    launcher: &dyn Launcher,
) -> Result<ProblemPaths> {
    let template = config.template(template_key)?;
    let paths = ProblemPaths::resolve(config, root, abbrev, problem, &template.filetype)?;
    let site = config.site(abbrev)?;
    let vars = Substitutions::for_problem(config, site, &paths.slug);

    let renderer = Renderer::new();
    let created = create_if_absent(&paths.code, || {
        renderer
            .render(&template.body, &vars)
            .with_context(|| format!("Failed to render template `{}`", template_key))
    })?;
    report(root, &paths.code, created);

    // A `txt` template makes the code file double as the input file
    let separate_input = !paths.input_is_code();
    if separate_input {
        report(root, &paths.input, create_if_absent(&paths.input, || Ok(String::new()))?);
    }

    let mut editor = Invocation::from_words(config.editor_command())
        .context("editor must name a command")?
        .path_arg(&paths.code)
        .current_dir(root);
    if config.open_input && separate_input {
        editor = editor.path_arg(&paths.input);
    }
    launcher.launch(&editor);

    Ok(paths)
}

/// Write the produced content to a new file; returns false if the file
/// already existed, in which case `content` is never called
fn create_if_absent<F>(path: &Path, content: F) -> Result<bool>
where
    F: FnOnce() -> Result<String>,
{
    if path.exists() {
        return Ok(false);
    }
    let content = content()?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create: {}", path.display()));
        }
    };
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(true)
}

fn report(root: &Path, path: &Path, created: bool) {
    if created {
        println!("{} {}", "Created:".green(), utils::display_path(root, path));
    } else {
        println!("{} {}", "Exists:".yellow(), utils::display_path(root, path));
    }
}
