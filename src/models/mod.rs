//! Data models for the design studio.
//!
//! Reference data (garments, fabrics, patterns, colors, elements) is immutable
//! once loaded into a [`Catalog`]. [`DesignSelection`] and [`HistoryLog`] are
//! the per-session mutable state owned by the studio controller.

pub mod catalog;
pub mod color;
pub mod element;
pub mod fabric;
pub mod garment;
pub mod history;
pub mod pattern;
pub mod selection;

use anyhow::Result;
use regex::Regex;

// Re-export all model types
pub use catalog::Catalog;
pub use color::{ColorSwatch, RgbColor};
pub use element::DesignElement;
pub use fabric::FabricOption;
pub use garment::GarmentTemplate;
pub use history::{HistoryEntry, HistoryLog};
pub use pattern::PatternOption;
pub use selection::{DesignSelection, Placement, PlacementKind};

/// Validates a catalog identifier.
///
/// Ids are lowercase ASCII, digits, underscores and hyphens, starting with a
/// letter or digit (e.g. "tshirt", "sleeve_left", "polka-dot").
pub(crate) fn validate_id(what: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("{what} ID cannot be empty");
    }

    let id_regex = Regex::new(r"^[a-z0-9][a-z0-9_-]*$")?;
    if !id_regex.is_match(id) {
        anyhow::bail!(
            "{what} ID '{id}' must be lowercase (letters, digits, '_' and '-' only)"
        );
    }

    Ok(())
}

/// Highest price any single catalog record may carry.
pub const MAX_PRICE: u32 = 10_000_000;

/// Most regions a garment template may define.
pub const MAX_REGIONS: usize = 64;

/// Rejects prices above [`MAX_PRICE`].
///
/// With at most [`MAX_REGIONS`] patterned regions, no design total can
/// overflow `u32`.
pub(crate) fn validate_price(what: &str, id: &str, amount: u32) -> Result<()> {
    if amount > MAX_PRICE {
        anyhow::bail!("{what} '{id}' price {amount} exceeds the maximum of {MAX_PRICE}");
    }
    Ok(())
}

/// Validates a display name (non-empty, at most 50 characters).
pub(crate) fn validate_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("{what} name cannot be empty");
    }

    if name.chars().count() > 50 {
        anyhow::bail!(
            "{what} name '{}' exceeds maximum length of 50 characters (got {})",
            name,
            name.chars().count()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id_valid() {
        assert!(validate_id("Garment", "tshirt").is_ok());
        assert!(validate_id("Region", "sleeve_left").is_ok());
        assert!(validate_id("Pattern", "polka-dot").is_ok());
        assert!(validate_id("Element", "3d-logo").is_ok());
    }

    #[test]
    fn test_validate_id_invalid() {
        assert!(validate_id("Garment", "").is_err());
        assert!(validate_id("Garment", "T-Shirt").is_err()); // uppercase
        assert!(validate_id("Garment", "t shirt").is_err()); // space
        assert!(validate_id("Garment", "-tshirt").is_err()); // leading hyphen
        assert!(validate_id("Garment", "_front").is_err()); // leading underscore
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Fabric", "Cotton").is_ok());
        assert!(validate_name("Fabric", "").is_err());
        assert!(validate_name("Fabric", "   ").is_err());
        assert!(validate_name("Fabric", &"a".repeat(51)).is_err());
    }
}
