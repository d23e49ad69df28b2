//! Shared error and output plumbing for CLI commands.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::error::StudioError;
use crate::models::Catalog;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (bad id, bad value, duplicate design)
    Validation = 1,
    /// A file could not be read, written or parsed
    Io = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A CLI failure carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed after `Error:`
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1)
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2)
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Every domain error is a rejected input.
impl From<StudioError> for CliError {
    fn from(err: StudioError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Prints `value` as one line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Loads the user configuration.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Loads the catalog at `path`, else the configured one, else the built-in one.
pub fn load_catalog(config: &Config, path: Option<&Path>) -> CliResult<Catalog> {
    let path = path.or(config.catalog.path.as_deref());
    Catalog::load_or_builtin(path)
        .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))
}

/// Formats an amount in rupees, e.g. `₹1,039`.
pub fn format_price(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{grouped}")
}
