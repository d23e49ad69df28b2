//! Static reference data for the design studio.
//!
//! The built-in catalog is embedded as JSON; a replacement can be loaded from a
//! JSON or TOML file with the same shape.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::{ColorSwatch, DesignElement, FabricOption, GarmentTemplate, PatternOption};
use crate::error::{CatalogKind, StudioError, StudioResult};

/// All reference records a design session can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Garment templates, in display order.
    pub garments: Vec<GarmentTemplate>,
    /// Fabric options, in display order.
    pub fabrics: Vec<FabricOption>,
    /// Pattern options, in display order.
    #[serde(default)]
    pub patterns: Vec<PatternOption>,
    /// Color swatches, in display order.
    #[serde(default)]
    pub colors: Vec<ColorSwatch>,
    /// Placeable design elements, in display order.
    #[serde(default)]
    pub elements: Vec<DesignElement>,
}

impl Catalog {
    /// Load the built-in catalog from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed or fails validation.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/catalog.json");
        Self::from_json(json_data).context("Built-in catalog is invalid")
    }

    /// Parses and validates a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(content).context("Failed to parse catalog TOML")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog file. Files ending in `.toml` are read as TOML,
    /// everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        };

        parsed.with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise the built-in catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::load(),
        }
    }

    /// Validates every record and checks ids are unique per list.
    pub fn validate(&self) -> Result<()> {
        if self.garments.is_empty() {
            anyhow::bail!("Catalog must contain at least one garment");
        }
        if self.fabrics.is_empty() {
            anyhow::bail!("Catalog must contain at least one fabric");
        }

        for garment in &self.garments {
            garment.validate()?;
        }
        for fabric in &self.fabrics {
            fabric.validate()?;
        }
        for pattern in &self.patterns {
            pattern.validate()?;
        }
        for color in &self.colors {
            color.validate()?;
        }
        for element in &self.elements {
            element.validate()?;
        }

        ensure_unique("garment", self.garments.iter().map(|g| g.id.as_str()))?;
        ensure_unique("fabric", self.fabrics.iter().map(|f| f.id.as_str()))?;
        ensure_unique("pattern", self.patterns.iter().map(|p| p.id.as_str()))?;
        ensure_unique("element", self.elements.iter().map(|e| e.id.as_str()))?;
        ensure_unique(
            "color",
            self.colors.iter().map(|c| c.name.to_ascii_lowercase()),
        )?;

        Ok(())
    }

    /// Looks up a garment by id.
    pub fn garment(&self, id: &str) -> Option<&GarmentTemplate> {
        self.garments.iter().find(|g| g.id == id)
    }

    /// Looks up a fabric by id.
    pub fn fabric(&self, id: &str) -> Option<&FabricOption> {
        self.fabrics.iter().find(|f| f.id == id)
    }

    /// Looks up a pattern by id.
    pub fn pattern(&self, id: &str) -> Option<&PatternOption> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Looks up a color swatch by name (ASCII case-insensitive).
    pub fn color(&self, name: &str) -> Option<&ColorSwatch> {
        self.colors
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Looks up a design element by id.
    pub fn element(&self, id: &str) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Like [`Catalog::garment`], failing with `NotFound`.
    pub fn require_garment(&self, id: &str) -> StudioResult<&GarmentTemplate> {
        self.garment(id)
            .ok_or_else(|| StudioError::not_found(CatalogKind::Garment, id))
    }

    /// Like [`Catalog::fabric`], failing with `NotFound`.
    pub fn require_fabric(&self, id: &str) -> StudioResult<&FabricOption> {
        self.fabric(id)
            .ok_or_else(|| StudioError::not_found(CatalogKind::Fabric, id))
    }

    /// Like [`Catalog::pattern`], failing with `NotFound`.
    pub fn require_pattern(&self, id: &str) -> StudioResult<&PatternOption> {
        self.pattern(id)
            .ok_or_else(|| StudioError::not_found(CatalogKind::Pattern, id))
    }

    /// Like [`Catalog::color`], failing with `NotFound`.
    pub fn require_color(&self, name: &str) -> StudioResult<&ColorSwatch> {
        self.color(name)
            .ok_or_else(|| StudioError::not_found(CatalogKind::Color, name))
    }

    /// Like [`Catalog::element`], failing with `NotFound`.
    pub fn require_element(&self, id: &str) -> StudioResult<&DesignElement> {
        self.element(id)
            .ok_or_else(|| StudioError::not_found(CatalogKind::Element, id))
    }
}

fn ensure_unique<I, S>(what: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        let id = id.as_ref().to_string();
        if !seen.insert(id.clone()) {
            anyhow::bail!("Duplicate {what} '{id}' in catalog");
        }
    }
    Ok(())
}
