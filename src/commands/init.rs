//! Init command - Interactively generate `cpsm.toml`

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::{config_path, Config, CONFIG_FILE};
use crate::error::CpsmError;
use crate::git::Git;
use crate::problem::paths::STAGING_DIR;
use crate::problem::Renderer;
use crate::process::Launcher;
use crate::prompt::Prompter;

const CONFIG_TEMPLATE: &str = include_str!("../templates/cpsm.toml.j2");

const DEFAULT_EDITOR: &str = "vim -p";

/// Everything asked during `init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitAnswers {
    pub username: String,
    pub fullname: String,
    pub editor: String,
    pub open_input: bool,
    pub abbreviations: Vec<SiteAnswer>,
    pub git_init: bool,
    pub git_save_code: bool,
    pub git_save_input: bool,
}

/// One site entered during `init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteAnswer {
    pub code: String,
    pub name: String,
    pub dir: String,
}

/// Execute the init command
pub fn execute<R: BufRead, W: Write>(
    root: &Path,
    prompter: &mut Prompter<R, W>,
    launcher: &dyn Launcher,
) -> Result<()> {
    let path = config_path(root);
    if path.exists() {
        return Err(CpsmError::ConfigExists(CONFIG_FILE.into()).into());
    }

    let answers = ask(prompter)?;
    let content = render_config(&answers)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Failed to create: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    println!("{} {}", "Created:".green(), CONFIG_FILE);

    if answers.git_init {
        Git::new(root, launcher).init();
    }

    let missing: Vec<_> = answers
        .abbreviations
        .iter()
        .map(|site| Path::new(&site.dir).join(STAGING_DIR))
        .filter(|dir| !root.join(dir).is_dir())
        .collect();
    if !missing.is_empty() {
        println!("\nCreate these directories before adding solutions:");
        for dir in missing {
            println!("  {}", dir.display());
        }
    }

    Ok(())
}

/// Ask every question in order
pub fn ask<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<InitAnswers> {
    let default_user = std::env::var("USER").unwrap_or_default();
    let username = prompter.ask("Username", &default_user)?;
    let fullname = prompter.ask("Full name", &username)?;
    let editor = prompter.ask("Editor command", DEFAULT_EDITOR)?;
    let open_input = prompter.confirm("Open input files alongside code?", true)?;

    let mut abbreviations: Vec<SiteAnswer> = Vec::new();
    loop {
        let question = if abbreviations.is_empty() {
            "Add a site abbreviation?"
        } else {
            "Add another site abbreviation?"
        };
        if !prompter.confirm(question, abbreviations.is_empty())? {
            break;
        }

        // Blank ends the list; a closed stdin answers blank too
        let code = prompter.ask("  Abbreviation", "")?;
        if code.is_empty() {
            break;
        }
        let name = prompter.ask("  Display name", &code)?;
        let dir = prompter.ask("  Directory", &code)?;
        abbreviations.push(SiteAnswer { code, name, dir });
    }

    let git_init = prompter.confirm("Initialize a git repository?", false)?;
    let (git_save_code, git_save_input) = if git_init {
        (
            prompter.confirm("Commit code files on save?", true)?,
            prompter.confirm("Commit input files on save?", false)?,
        )
    } else {
        (false, false)
    };

    Ok(InitAnswers {
        username,
        fullname,
        editor,
        open_input,
        abbreviations,
        git_init,
        git_save_code,
        git_save_input,
    })
}

/// Render `cpsm.toml` from the answers and check that it loads
pub fn render_config(answers: &InitAnswers) -> Result<String> {
    let content = Renderer::new()
        .render(CONFIG_TEMPLATE, answers)
        .context("Failed to render configuration template")?;
    Config::parse(&content)?;
    Ok(content)
}
