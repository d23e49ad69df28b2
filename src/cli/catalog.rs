//! Catalog listing command.
//!
//! Prints the garments, fabrics, patterns, colors and elements a design
//! session can choose from.

use crate::cli::common::{format_price, load_catalog, load_config, print_json, CliResult};
use crate::models::Catalog;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

/// Catalog section to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogSection {
    /// Garment templates and their regions
    Garments,
    /// Fabric options
    Fabrics,
    /// Region patterns
    Patterns,
    /// Color swatches
    Colors,
    /// Placeable design elements
    Elements,
}

/// List catalog reference data
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Only list this section
    #[arg(value_enum)]
    pub section: Option<CatalogSection>,

    /// Catalog file to read instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SectionResponse<'a, T: Serialize> {
    section: &'static str,
    items: &'a [T],
    count: usize,
}

impl<'a, T: Serialize> SectionResponse<'a, T> {
    const fn new(section: &'static str, items: &'a [T]) -> Self {
        Self {
            section,
            items,
            count: items.len(),
        }
    }
}

impl CatalogArgs {
    /// Execute the catalog command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let catalog = load_catalog(&config, self.catalog.as_deref())?;

        if self.json {
            return match self.section {
                None => print_json(&catalog),
                Some(CatalogSection::Garments) => {
                    print_json(&SectionResponse::new("garments", &catalog.garments))
                }
                Some(CatalogSection::Fabrics) => {
                    print_json(&SectionResponse::new("fabrics", &catalog.fabrics))
                }
                Some(CatalogSection::Patterns) => {
                    print_json(&SectionResponse::new("patterns", &catalog.patterns))
                }
                Some(CatalogSection::Colors) => {
                    print_json(&SectionResponse::new("colors", &catalog.colors))
                }
                Some(CatalogSection::Elements) => {
                    print_json(&SectionResponse::new("elements", &catalog.elements))
                }
            };
        }

        let sections = self.section.map_or_else(
            || {
                vec![
                    CatalogSection::Garments,
                    CatalogSection::Fabrics,
                    CatalogSection::Patterns,
                    CatalogSection::Colors,
                    CatalogSection::Elements,
                ]
            },
            |section| vec![section],
        );

        for (idx, section) in sections.into_iter().enumerate() {
            if idx > 0 {
                println!();
            }
            print_section(&catalog, section);
        }

        Ok(())
    }
}

fn print_section(catalog: &Catalog, section: CatalogSection) {
    match section {
        CatalogSection::Garments => {
            println!("Garments ({}):", catalog.garments.len());
            for garment in &catalog.garments {
                println!(
                    "  {:<12} {:<16} {:>8}  {}",
                    garment.id,
                    garment.name,
                    format_price(garment.base_price),
                    garment.regions.join(", ")
                );
            }
        }
        CatalogSection::Fabrics => {
            println!("Fabrics ({}):", catalog.fabrics.len());
            for fabric in &catalog.fabrics {
                println!(
                    "  {:<12} {:<16} {:>8}  {}",
                    fabric.id,
                    fabric.name,
                    format!("+{}", format_price(fabric.unit_price)),
                    fabric.description
                );
            }
        }
        CatalogSection::Patterns => {
            println!("Patterns ({}):", catalog.patterns.len());
            for pattern in &catalog.patterns {
                println!(
                    "  {:<12} {:<16} {:>8}",
                    pattern.id,
                    pattern.name,
                    format!("+{}", format_price(pattern.surcharge))
                );
            }
        }
        CatalogSection::Colors => {
            println!("Colors ({}):", catalog.colors.len());
            for color in &catalog.colors {
                println!("  {:<16} {}", color.name, color.hex);
            }
        }
        CatalogSection::Elements => {
            println!("Elements ({}):", catalog.elements.len());
            for element in &catalog.elements {
                println!("  {:<14} {:<16} {}", element.id, element.name, element.group);
            }
        }
    }
}
