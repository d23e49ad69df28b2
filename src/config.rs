//! Configuration management for the application.
//!
//! Settings live in a TOML file under the platform config directory. A missing
//! file means defaults; saving validates first and writes atomically.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{APP_NAME, CONFIG_DIR_ENV};
use crate::models::Catalog;
use crate::services::verification::{
    RandomDuplicateDetector, DEFAULT_DUPLICATE_PROBABILITY, DEFAULT_PROGRESS_STEP,
};
use crate::services::DesignStudio;

/// Where reference data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Catalog file (JSON or TOML). The built-in catalog is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Starting point of new design sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StudioConfig {
    /// Garment a new session starts on (first catalog garment when unset)
    #[serde(default)]
    pub default_garment: Option<String>,
    /// Fabric a new session starts on (first catalog fabric when unset)
    #[serde(default)]
    pub default_fabric: Option<String>,
}

/// Duplicate-check tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Percent added per progress tick (1..=100)
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
    /// Chance the stub detector reports a duplicate (0.0..=1.0)
    #[serde(default = "default_duplicate_probability")]
    pub duplicate_probability: f64,
}

const fn default_progress_step() -> u8 {
    DEFAULT_PROGRESS_STEP
}

const fn default_duplicate_probability() -> f64 {
    DEFAULT_DUPLICATE_PROBABILITY
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            progress_step: default_progress_step(),
            duplicate_probability: default_duplicate_probability(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/TailorNova/config.toml`
/// - macOS: `~/Library/Application Support/TailorNova/config.toml`
/// - Windows: `%APPDATA%\TailorNova\config.toml`
///
/// Setting `TAILORNOVA_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Reference data source
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// New-session defaults
    #[serde(default)]
    pub studio: StudioConfig,
    /// Duplicate-check settings
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory, honouring the override variable.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Validates, then writes to `path` via a temp file and rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `progress_step` lies in 1..=100
    /// - `duplicate_probability` lies in 0.0..=1.0
    /// - the catalog file exists, if one is set
    pub fn validate(&self) -> Result<()> {
        let step = self.verification.progress_step;
        if !(1..=100).contains(&step) {
            anyhow::bail!("progress_step must be between 1 and 100, got {step}");
        }

        let probability = self.verification.duplicate_probability;
        if !(0.0..=1.0).contains(&probability) {
            anyhow::bail!("duplicate_probability must be between 0.0 and 1.0, got {probability}");
        }

        if let Some(path) = &self.catalog.path {
            if !path.exists() {
                anyhow::bail!("Catalog file does not exist: {}", path.display());
            }
        }

        Ok(())
    }

    /// Loads the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::load_or_builtin(self.catalog.path.as_deref())
    }

    /// The duplicate detector described by this configuration.
    pub fn detector(&self) -> Arc<RandomDuplicateDetector> {
        Arc::new(RandomDuplicateDetector::new(
            self.verification.duplicate_probability,
        ))
    }

    /// Opens a design session on `catalog` with this configuration's
    /// defaults and detector.
    pub fn open_studio(&self, catalog: Catalog) -> Result<DesignStudio> {
        let studio = match (&self.studio.default_garment, &self.studio.default_fabric) {
            (None, None) => DesignStudio::new(catalog),
            (garment, fabric) => {
                let garment = garment
                    .clone()
                    .or_else(|| catalog.garments.first().map(|g| g.id.clone()))
                    .unwrap_or_default();
                let fabric = fabric
                    .clone()
                    .or_else(|| catalog.fabrics.first().map(|f| f.id.clone()))
                    .unwrap_or_default();
                DesignStudio::with_defaults(catalog, &garment, &fabric)
            }
        }
        .context("Configured studio defaults are not in the catalog")?;

        Ok(studio
            .with_detector(self.detector())
            .with_progress_step(self.verification.progress_step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert!(config.catalog.path.is_none());
        assert!(config.studio.default_garment.is_none());
        assert_eq!(config.verification.progress_step, 10);
        assert!((config.verification.duplicate_probability - 0.1).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_ranges() {
        let mut config = Config::new();
        config.verification.progress_step = 0;
        assert!(config.validate().is_err());

        config.verification.progress_step = 101;
        assert!(config.validate().is_err());

        config.verification.progress_step = 25;
        config.verification.duplicate_probability = 1.5;
        assert!(config.validate().is_err());

        config.verification.duplicate_probability = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_catalog_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.catalog.path = Some(temp_dir.path().join("missing.json"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.studio.default_garment = Some("hoodie".to_string());
        config.verification.progress_step = 20;
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.verification.duplicate_probability = -0.5;
        assert!(config.save_to(&config_file).is_err());
        assert!(!config_file.exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[studio]\ndefault_fabric = \"linen\"\n").unwrap();

        let config = Config::load_from(&config_file).unwrap();
        assert_eq!(config.studio.default_fabric.as_deref(), Some("linen"));
        assert_eq!(config.verification.progress_step, 10);
    }

    #[test]
    fn test_open_studio_uses_defaults() {
        let mut config = Config::new();
        config.studio.default_fabric = Some("denim".to_string());

        let studio = config.open_studio(Catalog::load().unwrap()).unwrap();
        assert_eq!(studio.selection().garment_id, "tshirt");
        assert_eq!(studio.selection().fabric_id, "denim");
        assert_eq!(studio.total_price(), 799 + 300 + 40);
    }

    #[test]
    fn test_open_studio_rejects_unknown_default() {
        let mut config = Config::new();
        config.studio.default_garment = Some("kilt".to_string());
        assert!(config.open_studio(Catalog::load().unwrap()).is_err());
    }
}
