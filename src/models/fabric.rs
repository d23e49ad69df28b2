//! Fabric options.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A fabric the garment can be made from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricOption {
    /// Unique identifier (e.g., "cotton")
    pub id: String,
    /// Display name (e.g., "Cotton")
    pub name: String,
    /// Price added to the garment base price
    pub unit_price: u32,
    /// Short description of the fabric's properties
    #[serde(default)]
    pub description: String,
}

impl FabricOption {
    /// Creates a new FabricOption with validation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: u32,
        description: impl Into<String>,
    ) -> Result<Self> {
        let fabric = Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            description: description.into(),
        };
        fabric.validate()?;
        Ok(fabric)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        super::validate_id("Fabric", &self.id)?;
        super::validate_name("Fabric", &self.name)?;
        super::validate_price("Fabric", &self.id, self.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let khadi = FabricOption::new("khadi", "Khadi", 250, "Handspun, sustainable").unwrap();
        assert_eq!(khadi.unit_price, 250);
    }

    #[test]
    fn test_free_fabric_allowed() {
        assert!(FabricOption::new("sample", "Sample", 0, "").is_ok());
    }

    #[test]
    fn test_rejects_price_above_maximum() {
        assert!(FabricOption::new("gold", "Gold Thread", u32::MAX, "").is_err());
    }

    #[test]
    fn test_rejects_bad_id() {
        assert!(FabricOption::new("Cotton", "Cotton", 200, "").is_err());
    }
}
