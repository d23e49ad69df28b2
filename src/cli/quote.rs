//! One-shot price quote without a session.

use crate::cli::common::{format_price, load_catalog, load_config, print_json, CliError, CliResult};
use crate::error::{CatalogKind, StudioError};
use crate::models::selection::{MAX_COMPLEXITY, MIN_COMPLEXITY};
use crate::models::DesignSelection;
use crate::services::pricing::{self, PriceBreakdown};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Price a garment, fabric and pattern combination
#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Garment template id
    #[arg(long, value_name = "ID")]
    pub garment: String,

    /// Fabric id
    #[arg(long, value_name = "ID")]
    pub fabric: String,

    /// Complexity score (1.0 to 5.0). Derived from the patterns when omitted.
    #[arg(long, value_name = "SCORE")]
    pub complexity: Option<f64>,

    /// Pattern for a region, e.g. `back=stripes` (repeatable)
    #[arg(long = "pattern", value_name = "REGION=ID", value_parser = parse_region_pattern)]
    pub patterns: Vec<(String, String)>,

    /// Catalog file to read instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_region_pattern(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((region, pattern)) if !region.trim().is_empty() && !pattern.trim().is_empty() => {
            Ok((region.trim().to_string(), pattern.trim().to_string()))
        }
        _ => Err(format!("expected REGION=ID, got '{value}'")),
    }
}

#[derive(Debug, Serialize)]
struct QuoteResponse<'a> {
    garment: &'a str,
    fabric: &'a str,
    complexity_score: f64,
    region_patterns: &'a std::collections::BTreeMap<String, String>,
    price: PriceBreakdown,
}

impl QuoteArgs {
    /// Execute the quote command
    pub fn execute(&self) -> CliResult<()> {
        if let Some(score) = self.complexity {
            if !(MIN_COMPLEXITY..=MAX_COMPLEXITY).contains(&score) {
                return Err(CliError::validation(format!(
                    "Complexity must be between {MIN_COMPLEXITY:.1} and {MAX_COMPLEXITY:.1}, got {score}"
                )));
            }
        }

        let config = load_config()?;
        let catalog = load_catalog(&config, self.catalog.as_deref())?;

        let garment = catalog.require_garment(&self.garment)?;
        let fabric = catalog.require_fabric(&self.fabric)?;

        let mut selection = DesignSelection::new(garment, self.fabric.as_str());
        for (region, pattern) in &self.patterns {
            if !garment.has_region(region) {
                return Err(StudioError::not_found(CatalogKind::Region, region).into());
            }
            catalog.require_pattern(pattern)?;
            selection
                .region_patterns
                .insert(region.clone(), pattern.clone());
        }

        match self.complexity {
            Some(score) => selection.complexity_score = score,
            None => selection.recompute_complexity(),
        }

        let price = pricing::quote(&selection, &catalog)?;

        if self.json {
            return print_json(&QuoteResponse {
                garment: &selection.garment_id,
                fabric: &selection.fabric_id,
                complexity_score: selection.complexity_score,
                region_patterns: &selection.region_patterns,
                price,
            });
        }

        println!("{} in {}", garment.name, fabric.name);
        println!("  Base price:   {:>8}", format_price(price.base));
        println!("  Fabric:       {:>8}", format_price(price.fabric));
        println!(
            "  Complexity:   {:>8}  (score {:.2})",
            format_price(price.complexity),
            selection.complexity_score
        );
        if !selection.region_patterns.is_empty() {
            println!("  Patterns:     {:>8}", format_price(price.patterns));
            for (region, pattern) in &selection.region_patterns {
                println!("    {region}: {pattern}");
            }
        }
        println!("  Total:        {:>8}", format_price(price.total));

        Ok(())
    }
}
