//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file location
    Path,
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Catalog file (JSON or TOML)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Garment new sessions start on
    #[arg(long, value_name = "ID")]
    default_garment: Option<String>,

    /// Fabric new sessions start on
    #[arg(long, value_name = "ID")]
    default_fabric: Option<String>,

    /// Chance of a duplicate verdict (0.0 to 1.0)
    #[arg(long, value_name = "P")]
    duplicate_probability: Option<f64>,

    /// Percent per verification progress tick (1 to 100)
    #[arg(long, value_name = "N")]
    progress_step: Option<u8>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            print_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.catalog.is_none()
            && self.default_garment.is_none()
            && self.default_fabric.is_none()
            && self.duplicate_probability.is_none()
            && self.progress_step.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --catalog, --default-garment, --default-fabric, --duplicate-probability, or --progress-step",
            ));
        }

        let mut config = load_config()?;

        if let Some(path) = &self.catalog {
            config.catalog.path = Some(path.clone());
        }
        if let Some(garment) = &self.default_garment {
            config.studio.default_garment = Some(garment.clone());
        }
        if let Some(fabric) = &self.default_fabric {
            config.studio.default_fabric = Some(fabric.clone());
        }
        if let Some(probability) = self.duplicate_probability {
            config.verification.duplicate_probability = probability;
        }
        if let Some(step) = self.progress_step {
            config.verification.progress_step = step;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        // Defaults must resolve against the catalog they will be used with
        let catalog = config
            .load_catalog()
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;
        config
            .open_studio(catalog)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn output_human_readable(config: &Config) {
    println!("TailorNova Configuration");
    println!("========================");
    println!();

    println!("Catalog:");
    match &config.catalog.path {
        Some(path) => println!("  Path: {}", path.display()),
        None => println!("  Path: (built-in)"),
    }
    println!();

    println!("Studio:");
    println!(
        "  Default Garment: {}",
        config
            .studio
            .default_garment
            .as_deref()
            .unwrap_or("(first in catalog)")
    );
    println!(
        "  Default Fabric:  {}",
        config
            .studio
            .default_fabric
            .as_deref()
            .unwrap_or("(first in catalog)")
    );
    println!();

    println!("Verification:");
    println!("  Progress Step:         {}%", config.verification.progress_step);
    println!(
        "  Duplicate Probability: {}",
        config.verification.duplicate_probability
    );
}
