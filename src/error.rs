//! Typed errors for the design engine.
//!
//! Application plumbing (config files, catalog parsing) uses `anyhow`; the
//! operations a view layer calls return [`StudioError`] so callers can tell a
//! missing catalog entry apart from an empty undo stack.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of catalog record a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Garment template
    Garment,
    /// Fabric option
    Fabric,
    /// Pattern option
    Pattern,
    /// Region on the selected garment
    Region,
    /// Color swatch
    Color,
    /// Placeable design element
    Element,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Garment => write!(f, "Garment"),
            Self::Fabric => write!(f, "Fabric"),
            Self::Pattern => write!(f, "Pattern"),
            Self::Region => write!(f, "Region"),
            Self::Color => write!(f, "Color"),
            Self::Element => write!(f, "Element"),
        }
    }
}

/// Direction of a history cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryDirection {
    /// Step back
    Undo,
    /// Step forward
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

/// Coarse grouping of [`StudioError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced id does not exist
    NotFound,
    /// Undo/redo had nowhere to move
    EmptyHistory,
    /// An upload was refused
    Rejected,
}

/// Errors surfaced by the design engine.
///
/// None of these are fatal to a session: the studio keeps its last valid
/// state whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudioError {
    /// A garment, fabric, pattern, region, color or element id did not resolve.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What was being looked up
        kind: CatalogKind,
        /// The id that failed to resolve
        id: String,
    },

    /// Undo or redo was requested with no entry to move to.
    #[error("Nothing to {direction}")]
    EmptyHistory {
        /// Requested direction
        direction: HistoryDirection,
    },

    /// The duplicate check matched an existing design.
    #[error("Duplicate design: {reason}")]
    DuplicateDesign {
        /// Human-readable explanation from the detector
        reason: String,
    },

    /// An upload step needs an image and none is attached.
    #[error("No design image attached")]
    MissingImage,

    /// Submission attempted before a successful verification.
    #[error("Design has not been verified as unique")]
    DesignNotVerified,

    /// Submission form values are invalid.
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),
}

impl StudioError {
    /// Creates a NotFound error
    pub fn not_found(kind: CatalogKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates an EmptyHistory error
    pub const fn empty_history(direction: HistoryDirection) -> Self {
        Self::EmptyHistory { direction }
    }

    /// Returns the coarse kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::EmptyHistory { .. } => ErrorKind::EmptyHistory,
            Self::DuplicateDesign { .. }
            | Self::MissingImage
            | Self::DesignNotVerified
            | Self::InvalidSubmission(_) => ErrorKind::Rejected,
        }
    }
}

/// Result alias for design engine operations.
pub type StudioResult<T> = Result<T, StudioError>;
