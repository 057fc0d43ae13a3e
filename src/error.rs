//! Operational errors reported as `ERROR: <message>` with exit code 1

use std::path::PathBuf;

use thiserror::Error;

/// Precondition failures that abort a command
#[derive(Debug, Error)]
pub enum CpsmError {
    #[error("you need a {} file!", .0.display())]
    MissingConfig(PathBuf),

    #[error("invalid configuration {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("{} already exists", .0.display())]
    ConfigExists(PathBuf),

    #[error("No config for the abbreviation: {0}")]
    UnknownAbbreviation(String),

    #[error("No config for the template: {0}")]
    UnknownTemplate(String),

    #[error("No run commands for the filetype: {0}")]
    UnknownFiletype(String),

    #[error("{} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("{} does not exist", .0.display())]
    MissingFile(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CpsmError::UnknownAbbreviation("foo".to_string()).to_string(),
            "No config for the abbreviation: foo"
        );
        assert_eq!(
            CpsmError::MissingConfig(PathBuf::from("cpsm.toml")).to_string(),
            "you need a cpsm.toml file!"
        );
        assert_eq!(
            CpsmError::MissingDirectory(PathBuf::from("uva/solving")).to_string(),
            "uva/solving does not exist"
        );
    }
}
