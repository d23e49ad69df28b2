//! TailorNova Library
//!
//! Design engine for a custom-clothing studio: catalog reference data,
//! deterministic pricing, a linear undo/redo history, a staged duplicate
//! check for artist uploads, and the controller that ties them together.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use error::{StudioError, StudioResult};
pub use models::Catalog;
pub use services::{compute_total_price, DesignStudio};
