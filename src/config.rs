//! Directory-local configuration loaded from `cpsm.toml`

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CpsmError;
use crate::problem::template::split_words;

/// Name of the configuration file expected in the working directory
pub const CONFIG_FILE: &str = "cpsm.toml";

/// Path of the configuration file for a working directory
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Parsed `cpsm.toml`
///
/// Loaded once per invocation and never mutated afterwards. Per-problem
/// variables live in [`crate::problem::Substitutions`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Command used to open files, e.g. `vim -p`
    pub editor: String,

    /// Open the input file alongside the code file
    #[serde(default = "default_true")]
    pub open_input: bool,

    /// Commit code files to git when saving
    #[serde(default)]
    pub git_save_code: bool,

    /// Commit input files to git when saving
    #[serde(default)]
    pub git_save_input: bool,

    /// Extra variables available to every template
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,

    /// Site abbreviation -> display name and directory
    pub abbreviations: BTreeMap<String, Site>,

    /// Template key -> filetype and body
    #[serde(default)]
    pub templates: BTreeMap<String, Template>,

    /// Filetype -> commands run in order by `cpsm run`
    #[serde(default)]
    pub run_commands: BTreeMap<String, Vec<RunCommand>>,
}

/// A competitive programming site or contest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    /// Display name, available to templates as `name`
    pub name: String,
    /// Directory relative to the working directory
    pub dir: PathBuf,
}

/// Skeleton for a new code file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Template {
    /// Extension of the generated code file
    pub filetype: String,
    pub body: String,
}

/// One entry of a filetype's run command list
///
/// Either a plain command line or a table with an input redirection:
///
/// ```toml
/// [run_commands]
/// py = [{ cmd = "python3 {{ problem_path }}.py", stdin = "{{ problem_path }}.txt" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RunCommand {
    Line(String),
    Redirected {
        cmd: String,
        #[serde(default)]
        stdin: Option<String>,
    },
}

impl RunCommand {
    /// The command line template
    pub fn command_line(&self) -> &str {
        match self {
            RunCommand::Line(cmd) => cmd,
            RunCommand::Redirected { cmd, .. } => cmd,
        }
    }

    /// Template for the file fed to the command's stdin
    pub fn stdin(&self) -> Option<&str> {
        match self {
            RunCommand::Line(_) => None,
            RunCommand::Redirected { stdin, .. } => stdin.as_deref(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load and validate `cpsm.toml` from `root`
    pub fn load(root: &Path) -> Result<Config> {
        let path = config_path(root);
        if !path.exists() {
            return Err(CpsmError::MissingConfig(PathBuf::from(CONFIG_FILE)).into());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        let config = Config::parse(&content)?;
        tracing::debug!(
            abbreviations = config.abbreviations.len(),
            templates = config.templates.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Config, CpsmError> {
        let config: Config = toml::from_str(content).map_err(|e| invalid(e.message()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CpsmError> {
        if split_words(&self.editor).is_empty() {
            return Err(invalid("editor must name a command"));
        }
        for (abbrev, site) in &self.abbreviations {
            if site.dir.as_os_str().is_empty() {
                return Err(invalid(&format!("abbreviation `{abbrev}` has an empty dir")));
            }
        }
        for (key, template) in &self.templates {
            let filetype = template.filetype.as_str();
            if filetype.is_empty() || filetype.contains(['/', '\\']) {
                return Err(invalid(&format!(
                    "template `{key}` has an invalid filetype `{filetype}`"
                )));
            }
        }
        for (filetype, commands) in &self.run_commands {
            if commands
                .iter()
                .any(|c| split_words(c.command_line()).is_empty())
            {
                return Err(invalid(&format!(
                    "run_commands.{filetype} contains an empty command"
                )));
            }
        }
        Ok(())
    }

    /// Look up a site by abbreviation
    pub fn site(&self, abbrev: &str) -> Result<&Site, CpsmError> {
        self.abbreviations
            .get(abbrev)
            .ok_or_else(|| CpsmError::UnknownAbbreviation(abbrev.to_string()))
    }

    /// Look up a code template by key
    pub fn template(&self, key: &str) -> Result<&Template, CpsmError> {
        self.templates
            .get(key)
            .ok_or_else(|| CpsmError::UnknownTemplate(key.to_string()))
    }

    /// Run commands registered for a filetype, in order
    pub fn run_commands(&self, filetype: &str) -> Result<&[RunCommand], CpsmError> {
        self.run_commands
            .get(filetype)
            .map(Vec::as_slice)
            .ok_or_else(|| CpsmError::UnknownFiletype(filetype.to_string()))
    }

    /// Editor command split into program and leading arguments
    pub fn editor_command(&self) -> Vec<String> {
        split_words(&self.editor)
    }
}

fn invalid(reason: &str) -> CpsmError {
    CpsmError::InvalidConfig {
        path: PathBuf::from(CONFIG_FILE),
        reason: reason.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
editor = "vim -p"
git_save_code = true

[mappings]
username = "btjanaka"

[abbreviations.uva]
name = "UVa"
dir = "uva"

[templates.cpp]
filetype = "cpp"
body = "// {{ name }} {{ problem_name }}\n"

[run_commands]
py = [
    "python3 {{ problem_path }}.py",
    { cmd = "python3 {{ problem_path }}.py", stdin = "{{ problem_path }}.txt" },
]
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.editor_command(), vec!["vim", "-p"]);
        assert!(config.open_input);
        assert!(config.git_save_code);
        assert!(!config.git_save_input);
        assert_eq!(config.mappings["username"], "btjanaka");
        assert_eq!(config.site("uva").unwrap().name, "UVa");
        assert_eq!(config.template("cpp").unwrap().filetype, "cpp");

        let py = config.run_commands("py").unwrap();
        assert_eq!(py.len(), 2);
        assert_eq!(py[0].stdin(), None);
        assert_eq!(py[1].stdin(), Some("{{ problem_path }}.txt"));
    }

    #[test]
    fn test_lookup_errors() {
        let config = Config::parse(SAMPLE).unwrap();
        assert!(matches!(
            config.site("foo"),
            Err(CpsmError::UnknownAbbreviation(a)) if a == "foo"
        ));
        assert!(matches!(
            config.template("java"),
            Err(CpsmError::UnknownTemplate(_))
        ));
        assert!(matches!(
            config.run_commands("cpp"),
            Err(CpsmError::UnknownFiletype(_))
        ));
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = Config::parse("[abbreviations]\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid configuration cpsm.toml"));
        assert!(msg.contains("editor"), "{msg}");
    }

    #[test]
    fn test_blank_editor_rejected() {
        let err = Config::parse("editor = \"  \"\n[abbreviations]\n").unwrap_err();
        assert!(err.to_string().contains("editor must name a command"));
    }

    #[test]
    fn test_bad_filetype_rejected() {
        let content = r#"
editor = "vim"
[abbreviations]
[templates.cpp]
filetype = "../cpp"
body = ""
"#;
        assert!(Config::parse(content).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CpsmError>(),
            Some(CpsmError::MissingConfig(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), SAMPLE).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.abbreviations.len(), 1);
    }
}
