//! Path resolution for a problem's solution file pair
//!
//! While being worked on, files live in the site's staging directory:
//!
//! ```text
//! <dir>/solving/<slug>.<ext>
//! <dir>/solving/<slug>.txt
//! ```
//!
//! Saving moves them one level up into `<dir>/`.

use std::path::{Path, PathBuf};

use super::slug::slug;
use crate::config::Config;
use crate::error::CpsmError;

/// Name of the staging subdirectory inside a site directory
pub const STAGING_DIR: &str = "solving";

/// Extension of input files
pub const INPUT_EXTENSION: &str = "txt";

/// Resolved locations of a problem's files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemPaths {
    /// Problem slug
    pub slug: String,
    /// The site directory, where saved files live
    pub site_dir: PathBuf,
    /// `<site_dir>/solving`
    pub staging_dir: PathBuf,
    /// Staged code file
    pub code: PathBuf,
    /// Staged input file
    pub input: PathBuf,
}

impl ProblemPaths {
    /// Resolve the staged file pair for a problem
    ///
    /// Fails if the abbreviation is unknown or the staging directory does not
    /// exist. The staging directory is never created here.
    pub fn resolve(
        config: &Config,
        root: &Path,
        abbrev: &str,
        title: &str,
        extension: &str,
    ) -> Result<Self, CpsmError> {
        let site = config.site(abbrev)?;
        let site_dir = root.join(&site.dir);
        let staging_dir = site_dir.join(STAGING_DIR);

        if !staging_dir.is_dir() {
            return Err(CpsmError::MissingDirectory(site.dir.join(STAGING_DIR)));
        }

        let slug = slug(title);
        let code = staging_dir.join(format!("{slug}.{extension}"));
        let input = staging_dir.join(format!("{slug}.{INPUT_EXTENSION}"));

        tracing::debug!(code = %code.display(), input = %input.display(), "resolved problem paths");

        Ok(Self {
            slug,
            site_dir,
            staging_dir,
            code,
            input,
        })
    }

    /// Staged path without extension, exposed to run commands as `problem_path`
    pub fn base(&self) -> PathBuf {
        self.staging_dir.join(&self.slug)
    }

    /// True when the code file's extension is the input extension, so both
    /// names resolve to the same file
    pub fn input_is_code(&self) -> bool {
        self.code == self.input
    }

    /// Where a staged file ends up once saved
    pub fn saved_location(&self, staged: &Path) -> PathBuf {
        match staged.file_name() {
            Some(name) => self.site_dir.join(name),
            None => self.site_dir.clone(),
        }
    }
}
