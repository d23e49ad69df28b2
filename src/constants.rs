//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the config directory override.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "TailorNova";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "tailornova";

/// Environment variable that overrides the platform config directory.
pub const CONFIG_DIR_ENV: &str = "TAILORNOVA_CONFIG_DIR";

/// History label recorded once when a design session starts.
pub const SESSION_START_LABEL: &str = "Started new design";
