//! Per-session design selection state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::GarmentTemplate;

/// Lowest complexity score; a plain garment with no customization.
pub const MIN_COMPLEXITY: f64 = 1.0;
/// Highest complexity score.
pub const MAX_COMPLEXITY: f64 = 5.0;
/// Score added for every region carrying a pattern.
pub const PATTERN_COMPLEXITY: f64 = 0.5;
/// Score added for every placed shape or graphic.
pub const ELEMENT_COMPLEXITY: f64 = 0.25;
/// Score added for every uploaded image.
pub const IMAGE_COMPLEXITY: f64 = 0.5;

/// What a placement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    /// A catalog design element
    Element,
    /// A customer-uploaded image
    Image,
}

/// Something placed on one region of the garment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Element or image
    pub kind: PlacementKind,
    /// Element id, or image file name
    pub reference: String,
    /// Region the placement sits on
    pub region: String,
}

/// The customer's current choices in a design session.
///
/// # Invariant
///
/// `region_id` is always one of the selected garment's regions. Use
/// [`DesignSelection::change_garment`] rather than assigning `garment_id`
/// directly so the invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSelection {
    /// Selected garment template id
    pub garment_id: String,
    /// Selected fabric id
    pub fabric_id: String,
    /// Region currently being customized
    pub region_id: String,
    /// Pattern id applied to each region, if any
    pub region_patterns: BTreeMap<String, String>,
    /// Heuristic in `MIN_COMPLEXITY..=MAX_COMPLEXITY`
    pub complexity_score: f64,
    /// Applied color swatch name
    pub color: Option<String>,
    /// Elements and images in the order they were added
    pub placements: Vec<Placement>,
}

impl DesignSelection {
    /// Starts a selection on `garment`'s first region with no customization.
    pub fn new(garment: &GarmentTemplate, fabric_id: impl Into<String>) -> Self {
        Self {
            garment_id: garment.id.clone(),
            fabric_id: fabric_id.into(),
            region_id: garment.first_region().to_string(),
            region_patterns: BTreeMap::new(),
            complexity_score: MIN_COMPLEXITY,
            color: None,
            placements: Vec::new(),
        }
    }

    /// Switches to `garment`, keeping only customization on regions it has.
    ///
    /// If the current region does not exist on the new garment, the region
    /// resets to the garment's first region. Returns `true` when that reset
    /// happened.
    pub fn change_garment(&mut self, garment: &GarmentTemplate) -> bool {
        self.garment_id.clone_from(&garment.id);
        self.region_patterns
            .retain(|region, _| garment.has_region(region));
        self.placements
            .retain(|placement| garment.has_region(&placement.region));
        self.recompute_complexity();

        if garment.has_region(&self.region_id) {
            false
        } else {
            self.region_id = garment.first_region().to_string();
            true
        }
    }

    /// Number of placements of the given kind.
    pub fn placement_count(&self, kind: PlacementKind) -> usize {
        self.placements.iter().filter(|p| p.kind == kind).count()
    }

    /// Recomputes `complexity_score` from the current customization.
    pub fn recompute_complexity(&mut self) {
        self.complexity_score = complexity_for(
            self.region_patterns.len(),
            self.placement_count(PlacementKind::Element),
            self.placement_count(PlacementKind::Image),
        );
    }
}

/// Deterministic complexity score for a design.
///
/// `1.0 + 0.5 per patterned region + 0.25 per element + 0.5 per image`,
/// capped at [`MAX_COMPLEXITY`].
#[allow(clippy::cast_precision_loss)]
pub fn complexity_for(patterned_regions: usize, elements: usize, images: usize) -> f64 {
    let raw = MIN_COMPLEXITY
        + PATTERN_COMPLEXITY * patterned_regions as f64
        + ELEMENT_COMPLEXITY * elements as f64
        + IMAGE_COMPLEXITY * images as f64;
    raw.min(MAX_COMPLEXITY)
}
