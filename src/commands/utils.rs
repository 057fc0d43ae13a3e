//! Shared utilities for commands

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Path relative to the working directory, for messages
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print an operational error the way `main` does
pub fn report_error(err: &anyhow::Error) {
    eprintln!("ERROR: {:#}", err);
}

/// Move a file, replacing any file already at `to`
///
/// Falls back to copy-and-delete when a rename is not possible, e.g. across
/// filesystems.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    let options = fs_extra::file::CopyOptions::new().overwrite(true);
    fs_extra::file::move_file(from, to, &options)
        .with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))?;
    Ok(())
}
