//! Garment templates and their customizable regions.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A garment a customer can start a design from.
///
/// # Validation
///
/// - ID and every region ID must be lowercase identifiers
/// - Base price must be positive and at most [`MAX_PRICE`](super::MAX_PRICE)
/// - Regions must be non-empty, unique and at most [`MAX_REGIONS`](super::MAX_REGIONS)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentTemplate {
    /// Unique identifier (e.g., "tshirt", "hoodie")
    pub id: String,
    /// Display name (e.g., "T-Shirt")
    pub name: String,
    /// Price of the undecorated garment in whole currency units
    pub base_price: u32,
    /// Customizable regions in display order (e.g., "front", "sleeves")
    pub regions: Vec<String>,
}

impl GarmentTemplate {
    /// Creates a new GarmentTemplate with validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tailornova::models::GarmentTemplate;
    ///
    /// let tshirt = GarmentTemplate::new("tshirt", "T-Shirt", 799, ["front", "back"]).unwrap();
    /// assert_eq!(tshirt.first_region(), "front");
    /// ```
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        base_price: u32,
        regions: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let garment = Self {
            id: id.into(),
            name: name.into(),
            base_price,
            regions: regions.into_iter().map(Into::into).collect(),
        };
        garment.validate()?;
        Ok(garment)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        super::validate_id("Garment", &self.id)?;
        super::validate_name("Garment", &self.name)?;

        if self.base_price == 0 {
            anyhow::bail!("Garment '{}' must have a positive base price", self.id);
        }
        super::validate_price("Garment", &self.id, self.base_price)?;

        if self.regions.is_empty() {
            anyhow::bail!("Garment '{}' must define at least one region", self.id);
        }

        if self.regions.len() > super::MAX_REGIONS {
            anyhow::bail!(
                "Garment '{}' defines {} regions, more than the maximum of {}",
                self.id,
                self.regions.len(),
                super::MAX_REGIONS
            );
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            super::validate_id("Region", region)?;
            if !seen.insert(region.as_str()) {
                anyhow::bail!("Garment '{}' lists region '{region}' more than once", self.id);
            }
        }

        Ok(())
    }

    /// Returns true if the garment has the given region.
    pub fn has_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    /// The region selected by default on this garment.
    pub fn first_region(&self) -> &str {
        // validate() guarantees at least one region
        self.regions.first().map_or("", String::as_str)
    }
}
