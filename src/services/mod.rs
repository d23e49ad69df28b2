//! Business logic of the design studio.
//!
//! Pricing and verification are pure functions and plain iterators; the
//! [`DesignStudio`] controller ties them to one session's mutable state.

pub mod artist_upload;
pub mod commands;
pub mod pricing;
pub mod studio;
pub mod verification;

pub use artist_upload::{ArtistUpload, DesignSubmission, UploadStatus, DEFAULT_DESIGN_PRICE};
pub use commands::{parse_script, StudioCommand};
pub use pricing::{compute_total_price, price_breakdown, PriceBreakdown};
pub use studio::{DesignStudio, StudioSnapshot};
pub use verification::{
    DesignImage, DuplicateDetector, FixedDuplicateDetector, RandomDuplicateDetector, Verdict,
    VerificationEvent, VerificationRun,
};
