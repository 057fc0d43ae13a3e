//! Stable exit codes for the cpsm CLI.

/// Command succeeded, or usage text was printed (including malformed invocations).
pub const OK: u8 = 0;
/// An operation failed: missing configuration, unknown key, missing file or directory.
pub const ERROR: u8 = 1;
