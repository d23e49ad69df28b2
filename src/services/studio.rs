//! The design studio controller.
//!
//! [`DesignStudio`] owns one customer's selection, its history and the current
//! price. Every successful command records exactly one history entry and
//! reprices the design; a failed command changes nothing.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::pricing::{self, PriceBreakdown};
use super::verification::{
    DesignImage, DuplicateDetector, RandomDuplicateDetector, VerificationRun,
    DEFAULT_PROGRESS_STEP,
};
use crate::constants::SESSION_START_LABEL;
use crate::error::{CatalogKind, StudioError, StudioResult};
use crate::models::{Catalog, DesignSelection, HistoryEntry, HistoryLog, Placement, PlacementKind};

/// Serializable view of a studio at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioSnapshot {
    /// Current selection
    pub selection: DesignSelection,
    /// Itemised price of the selection
    pub price: PriceBreakdown,
    /// Cursor into `history`, `-1` when empty
    pub history_index: isize,
    /// Whether undo is possible
    pub can_undo: bool,
    /// Whether redo is possible
    pub can_redo: bool,
    /// Every recorded entry, oldest first
    pub history: Vec<HistoryEntry>,
}

/// Single-writer state for one design session.
pub struct DesignStudio {
    catalog: Catalog,
    selection: DesignSelection,
    history: HistoryLog,
    price: PriceBreakdown,
    detector: Arc<dyn DuplicateDetector>,
    progress_step: u8,
}

impl std::fmt::Debug for DesignStudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignStudio")
            .field("selection", &self.selection)
            .field("history_index", &self.history.history_index())
            .field("price", &self.price)
            .field("progress_step", &self.progress_step)
            .finish_non_exhaustive()
    }
}

impl DesignStudio {
    /// Opens a session on the catalog's first garment and fabric.
    pub fn new(catalog: Catalog) -> StudioResult<Self> {
        let garment_id = catalog
            .garments
            .first()
            .map(|g| g.id.clone())
            .ok_or_else(|| StudioError::not_found(CatalogKind::Garment, ""))?;
        let fabric_id = catalog
            .fabrics
            .first()
            .map(|f| f.id.clone())
            .ok_or_else(|| StudioError::not_found(CatalogKind::Fabric, ""))?;
        Self::with_defaults(catalog, &garment_id, &fabric_id)
    }

    /// Opens a session on the given garment and fabric.
    ///
    /// The session starts with a single "Started new design" entry.
    pub fn with_defaults(catalog: Catalog, garment_id: &str, fabric_id: &str) -> StudioResult<Self> {
        let garment = catalog.require_garment(garment_id)?;
        catalog.require_fabric(fabric_id)?;

        let selection = DesignSelection::new(garment, fabric_id);
        let price = pricing::quote(&selection, &catalog)?;

        let mut history = HistoryLog::new();
        history.record(SESSION_START_LABEL);

        info!(garment = garment_id, fabric = fabric_id, total = price.total, "design session started");

        Ok(Self {
            catalog,
            selection,
            history,
            price,
            detector: Arc::new(RandomDuplicateDetector::default()),
            progress_step: DEFAULT_PROGRESS_STEP,
        })
    }

    /// Replaces the duplicate detector used by [`DesignStudio::start_duplicate_check`].
    #[must_use]
    pub fn with_detector(mut self, detector: Arc<dyn DuplicateDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Sets the progress increment of duplicate checks.
    #[must_use]
    pub fn with_progress_step(mut self, step: u8) -> Self {
        self.progress_step = step;
        self
    }

    // === Commands ===

    /// Switches garment. Customization on regions the new garment lacks is
    /// dropped, and the region resets to the first one if needed.
    pub fn select_garment(&mut self, garment_id: &str) -> StudioResult<&HistoryEntry> {
        let garment = self.catalog.require_garment(garment_id)?;
        let label = format!("Selected {}", garment.name);

        let mut candidate = self.selection.clone();
        if candidate.change_garment(garment) {
            debug!(region = %candidate.region_id, "region reset for new garment");
        }
        self.commit(candidate, label)
    }

    /// Switches fabric.
    pub fn select_fabric(&mut self, fabric_id: &str) -> StudioResult<&HistoryEntry> {
        let fabric = self.catalog.require_fabric(fabric_id)?;
        let label = format!("Changed fabric to {}", fabric.name);

        let mut candidate = self.selection.clone();
        candidate.fabric_id.clone_from(&fabric.id);
        self.commit(candidate, label)
    }

    /// Makes `region_id` the region being customized.
    pub fn select_region(&mut self, region_id: &str) -> StudioResult<&HistoryEntry> {
        self.require_region(region_id)?;

        let mut candidate = self.selection.clone();
        candidate.region_id = region_id.to_string();
        self.commit(candidate, format!("Selected region {region_id}"))
    }

    /// Applies a pattern to one region, replacing any pattern already there.
    pub fn apply_pattern_to_region(
        &mut self,
        region_id: &str,
        pattern_id: &str,
    ) -> StudioResult<&HistoryEntry> {
        self.require_region(region_id)?;
        let pattern = self.catalog.require_pattern(pattern_id)?;
        let label = format!("Applied {} pattern to {region_id}", pattern.name);

        let mut candidate = self.selection.clone();
        candidate
            .region_patterns
            .insert(region_id.to_string(), pattern.id.clone());
        candidate.recompute_complexity();
        self.commit(candidate, label)
    }

    /// Removes the pattern from one region. Clearing an unpatterned region
    /// still counts as an action.
    pub fn clear_region_pattern(&mut self, region_id: &str) -> StudioResult<&HistoryEntry> {
        self.require_region(region_id)?;

        let mut candidate = self.selection.clone();
        candidate.region_patterns.remove(region_id);
        candidate.recompute_complexity();
        self.commit(candidate, format!("Cleared pattern from {region_id}"))
    }

    /// Applies a color swatch, matched by name ignoring case.
    pub fn select_color(&mut self, name: &str) -> StudioResult<&HistoryEntry> {
        let swatch = self.catalog.require_color(name)?;
        let label = format!("Changed color to {}", swatch.name);

        let mut candidate = self.selection.clone();
        candidate.color = Some(swatch.name.clone());
        self.commit(candidate, label)
    }

    /// Places a catalog element on the current region.
    pub fn add_element(&mut self, element_id: &str) -> StudioResult<&HistoryEntry> {
        let element = self.catalog.require_element(element_id)?;
        let label = format!("Added {} element", element.name);

        let mut candidate = self.selection.clone();
        candidate.placements.push(Placement {
            kind: PlacementKind::Element,
            reference: element.id.clone(),
            region: candidate.region_id.clone(),
        });
        candidate.recompute_complexity();
        self.commit(candidate, label)
    }

    /// Places an uploaded image on the current region.
    pub fn add_image(&mut self, file_name: &str) -> StudioResult<&HistoryEntry> {
        let mut candidate = self.selection.clone();
        candidate.placements.push(Placement {
            kind: PlacementKind::Image,
            reference: file_name.to_string(),
            region: candidate.region_id.clone(),
        });
        candidate.recompute_complexity();
        self.commit(candidate, format!("Added image: {file_name}"))
    }

    /// Moves the history cursor back. The selection is not reverted.
    pub fn undo(&mut self) -> StudioResult<&HistoryEntry> {
        match self.history.undo() {
            Ok(entry) => {
                debug!(action = %entry.action, "undo");
                Ok(entry)
            }
            Err(err) => {
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Moves the history cursor forward. The selection is not changed.
    pub fn redo(&mut self) -> StudioResult<&HistoryEntry> {
        match self.history.redo() {
            Ok(entry) => {
                debug!(action = %entry.action, "redo");
                Ok(entry)
            }
            Err(err) => {
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Starts a staged duplicate check of `image` with the studio's detector.
    pub fn start_duplicate_check(&self, image: DesignImage) -> VerificationRun {
        debug!(file = %image.file_name, step = self.progress_step, "duplicate check started");
        VerificationRun::new(Arc::clone(&self.detector), image, self.progress_step)
    }

    // === Accessors ===

    /// Current selection.
    pub const fn selection(&self) -> &DesignSelection {
        &self.selection
    }

    /// Current total price.
    pub const fn total_price(&self) -> u32 {
        self.price.total
    }

    /// Current itemised price.
    pub const fn price_breakdown(&self) -> PriceBreakdown {
        self.price
    }

    /// The history log.
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// True when undo would succeed.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True when redo would succeed.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reference data this session draws from.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Copies the current state into a serializable snapshot.
    pub fn snapshot(&self) -> StudioSnapshot {
        StudioSnapshot {
            selection: self.selection.clone(),
            price: self.price,
            history_index: self.history.history_index(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            history: self.history.entries().to_vec(),
        }
    }

    // === Internals ===

    fn require_region(&self, region_id: &str) -> StudioResult<()> {
        let garment = self.catalog.require_garment(&self.selection.garment_id)?;
        if garment.has_region(region_id) {
            Ok(())
        } else {
            Err(StudioError::not_found(CatalogKind::Region, region_id))
        }
    }

    /// Prices `candidate`, then swaps it in and records `label`. Nothing is
    /// touched if pricing fails.
    fn commit(&mut self, candidate: DesignSelection, label: String) -> StudioResult<&HistoryEntry> {
        let price = pricing::quote(&candidate, &self.catalog)?;
        self.selection = candidate;
        self.price = price;

        let entry = self.history.record(label);
        info!(action = %entry.action, total = price.total, "design updated");
        Ok(entry)
    }
}
