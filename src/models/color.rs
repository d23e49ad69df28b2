//! Color swatches and hex color parsing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value with hex string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use tailornova::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#172554").unwrap();
    /// assert_eq!(color, RgbColor::new(0x17, 0x25, 0x54));
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A named color a customer can apply to the garment.
///
/// Colors carry no price effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    /// Display name, unique within a catalog (e.g. "Navy")
    pub name: String,
    /// Hex value as written in the catalog (e.g. "#172554")
    pub hex: String,
}

impl ColorSwatch {
    /// Creates a swatch, validating the name and hex value.
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Result<Self> {
        let swatch = Self {
            name: name.into(),
            hex: hex.into(),
        };
        swatch.validate()?;
        Ok(swatch)
    }

    /// Parsed RGB value of this swatch.
    pub fn rgb(&self) -> Result<RgbColor> {
        RgbColor::from_hex(&self.hex)
            .with_context(|| format!("Color '{}' has an invalid hex value", self.name))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        super::validate_name("Color", &self.name)?;
        self.rgb()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_and_without_hash() {
        assert_eq!(RgbColor::from_hex("#FF0000").unwrap(), RgbColor::new(255, 0, 0));
        assert_eq!(RgbColor::from_hex("00ff00").unwrap(), RgbColor::new(0, 255, 0));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("").is_err());
    }

    #[test]
    fn test_to_hex_uppercase() {
        assert_eq!(RgbColor::new(0x0e, 0xa5, 0xe9).to_hex(), "#0EA5E9");
    }

    #[test]
    fn test_swatch_validation() {
        let navy = ColorSwatch::new("Navy", "#172554").unwrap();
        assert_eq!(navy.rgb().unwrap(), RgbColor::new(0x17, 0x25, 0x54));

        assert!(ColorSwatch::new("", "#172554").is_err());
        assert!(ColorSwatch::new("Broken", "#17255").is_err());
    }
}
