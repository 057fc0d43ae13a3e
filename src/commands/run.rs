//! Run command - Execute the configured commands for a filetype

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::config::{Config, RunCommand};
use crate::problem::template::split_words;
use crate::problem::{ProblemPaths, Renderer, Substitutions};
use crate::process::{Invocation, Launcher};

/// Execute the run command
///
/// Every command is rendered before the first one starts. Commands then run
/// in order; a failing command does not stop the ones after it.
pub fn execute(
    config: &Config,
    root: &Path,
    abbrev: &str,
    problem: &str,
    filetype: &str,
    launcher: &dyn Launcher,
) -> Result<()> {
    let commands = config.run_commands(filetype)?;
    let paths = ProblemPaths::resolve(config, root, abbrev, problem, filetype)?;
    let site = config.site(abbrev)?;
    let vars = Substitutions::for_problem(config, site, &paths.slug)
        .with("problem_path", &paths.base().to_string_lossy());

    let renderer = Renderer::new();
    let invocations = commands
        .iter()
        .map(|command| build_invocation(&renderer, command, &vars, root))
        .collect::<Result<Vec<_>>>()?;

    let total = invocations.len();
    for (i, invocation) in invocations.iter().enumerate() {
        println!(
            "{} {}",
            format!("[{}/{}]", i + 1, total).blue(),
            invocation.display()
        );
        launcher.launch(invocation);
    }

    Ok(())
}

/// Render one run command into an invocation
///
/// The command line is split into words before rendering, so substituted
/// values always stay single arguments.
fn build_invocation(
    renderer: &Renderer,
    command: &RunCommand,
    vars: &Substitutions,
    root: &Path,
) -> Result<Invocation> {
    let line = command.command_line();
    let words = split_words(line)
        .iter()
        .map(|word| renderer.render(word, vars))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to render run command `{}`", line))?;

    let mut invocation = Invocation::from_words(words)
        .with_context(|| format!("Empty run command `{}`", line))?
        .current_dir(root);

    if let Some(stdin) = command.stdin() {
        let stdin = renderer
            .render(stdin, vars)
            .with_context(|| format!("Failed to render stdin `{}`", stdin))?;
        invocation = invocation.stdin_from(root.join(stdin));
    }

    Ok(invocation)
}
