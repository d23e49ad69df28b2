//! Price computation for a design selection.
//!
//! Pricing is pure arithmetic over catalog records: it never mutates the
//! selection and returns the same total for the same inputs.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogKind, StudioError, StudioResult};
use crate::models::{Catalog, DesignSelection, FabricOption, GarmentTemplate, PatternOption};

/// Surcharge per point of complexity score.
pub const COMPLEXITY_RATE: f64 = 40.0;

/// Upper bound on the complexity surcharge.
pub const COMPLEXITY_SURCHARGE_CAP: u32 = 200;

/// Itemised price of a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Garment base price
    pub base: u32,
    /// Fabric price
    pub fabric: u32,
    /// Capped complexity surcharge
    pub complexity: u32,
    /// Sum of per-region pattern surcharges
    pub patterns: u32,
    /// Sum of all of the above
    pub total: u32,
}

/// Surcharge for a complexity score: `min(200, round(score * 40))`.
///
/// The cap is applied to the surcharge, not to the score.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn complexity_surcharge(score: f64) -> u32 {
    // `as` saturates: negative or NaN scores cost nothing
    let raw = (score * COMPLEXITY_RATE).round() as u32;
    raw.min(COMPLEXITY_SURCHARGE_CAP)
}

/// Computes the itemised price of `selection`.
///
/// # Errors
///
/// Returns `NotFound` if the selected garment or fabric is not in the given
/// lists. Unknown pattern ids contribute nothing. Totals saturate at
/// `u32::MAX` for records that bypassed catalog validation.
pub fn price_breakdown(
    selection: &DesignSelection,
    garments: &[GarmentTemplate],
    fabrics: &[FabricOption],
    patterns: &[PatternOption],
) -> StudioResult<PriceBreakdown> {
    let garment = garments
        .iter()
        .find(|g| g.id == selection.garment_id)
        .ok_or_else(|| StudioError::not_found(CatalogKind::Garment, &selection.garment_id))?;
    let fabric = fabrics
        .iter()
        .find(|f| f.id == selection.fabric_id)
        .ok_or_else(|| StudioError::not_found(CatalogKind::Fabric, &selection.fabric_id))?;

    let complexity = complexity_surcharge(selection.complexity_score);
    let pattern_total = selection
        .region_patterns
        .values()
        .filter_map(|pattern_id| patterns.iter().find(|p| &p.id == pattern_id))
        .map(|pattern| pattern.surcharge)
        .fold(0_u32, u32::saturating_add);

    Ok(PriceBreakdown {
        base: garment.base_price,
        fabric: fabric.unit_price,
        complexity,
        patterns: pattern_total,
        total: garment
            .base_price
            .saturating_add(fabric.unit_price)
            .saturating_add(complexity)
            .saturating_add(pattern_total),
    })
}

/// Computes the total price of `selection`.
///
/// # Examples
///
/// ```
/// use tailornova::models::{Catalog, DesignSelection};
/// use tailornova::services::pricing::compute_total_price;
///
/// let catalog = Catalog::load().unwrap();
/// let tshirt = catalog.garment("tshirt").unwrap();
/// let selection = DesignSelection::new(tshirt, "cotton");
///
/// let total = compute_total_price(
///     &selection,
///     &catalog.garments,
///     &catalog.fabrics,
///     &catalog.patterns,
/// )
/// .unwrap();
/// assert_eq!(total, 799 + 200 + 40);
/// ```
pub fn compute_total_price(
    selection: &DesignSelection,
    garments: &[GarmentTemplate],
    fabrics: &[FabricOption],
    patterns: &[PatternOption],
) -> StudioResult<u32> {
    price_breakdown(selection, garments, fabrics, patterns).map(|breakdown| breakdown.total)
}

/// [`price_breakdown`] against a whole catalog.
pub fn quote(selection: &DesignSelection, catalog: &Catalog) -> StudioResult<PriceBreakdown> {
    price_breakdown(
        selection,
        &catalog.garments,
        &catalog.fabrics,
        &catalog.patterns,
    )
}
