//! Placeable design elements (shapes and graphics).

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A shape or graphic that can be placed on a garment region.
///
/// Elements have no direct price; each placement raises the design's
/// complexity score instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignElement {
    /// Unique identifier (e.g., "star")
    pub id: String,
    /// Display name (e.g., "Star")
    pub name: String,
    /// Grouping shown to the customer (e.g., "Basic Shapes", "Graphics")
    pub group: String,
}

impl DesignElement {
    /// Creates a new DesignElement with validation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<Self> {
        let element = Self {
            id: id.into(),
            name: name.into(),
            group: group.into(),
        };
        element.validate()?;
        Ok(element)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        super::validate_id("Element", &self.id)?;
        super::validate_name("Element", &self.name)?;
        super::validate_name("Element group", &self.group)
    }
}
