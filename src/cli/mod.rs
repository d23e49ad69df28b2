//! CLI command handlers for TailorNova.
//!
//! Headless, scriptable access to the catalog, pricing, design sessions and
//! the artist upload flow.

pub mod catalog;
pub mod common;
pub mod config;
pub mod quote;
pub mod session;
pub mod verify;

// Re-export types used by main.rs and tests
pub use catalog::CatalogArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use quote::QuoteArgs;
pub use session::SessionArgs;
pub use verify::VerifyArgs;
