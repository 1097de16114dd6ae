//! User-facing messages on stderr
//!
//! Warnings and errors are shown in color without logging noise
//! (timestamps, levels, module paths). Extraction results go to stdout
//! through [`crate::writer`], never through here.

use owo_colors::OwoColorize;

/// Display a warning message to the user in yellow
///
/// # Example
/// ```ignore
/// output::warn("No name rows found in baby1990.html");
/// ```
pub fn warn(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Display an error message to the user in red
///
/// # Example
/// ```ignore
/// output::error("Failed to open baby2099.html: No such file or directory");
/// ```
pub fn error(message: &str) {
    eprintln!("{}", message.red());
}
