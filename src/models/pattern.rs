//! Pattern options that can be applied to garment regions.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A pattern with a per-region surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternOption {
    /// Unique identifier (e.g., "stripes")
    pub id: String,
    /// Display name (e.g., "Stripes")
    pub name: String,
    /// Charged once for every region carrying this pattern
    pub surcharge: u32,
}

impl PatternOption {
    /// Creates a new PatternOption with validation.
    pub fn new(id: impl Into<String>, name: impl Into<String>, surcharge: u32) -> Result<Self> {
        let pattern = Self {
            id: id.into(),
            name: name.into(),
            surcharge,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        super::validate_id("Pattern", &self.id)?;
        super::validate_name("Pattern", &self.name)?;
        super::validate_price("Pattern", &self.id, self.surcharge)
    }
}
