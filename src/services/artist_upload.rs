//! Artist design upload flow.
//!
//! An artist attaches an image, runs the duplicate check, and only then may
//! submit the design with a title and price. Submitting resets the form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::verification::{DesignImage, DuplicateDetector, Verdict, VerificationRun};
use crate::error::{StudioError, StudioResult};

/// Price pre-filled on a fresh upload form.
pub const DEFAULT_DESIGN_PRICE: u32 = 999;

/// Verification state of the attached image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadStatus {
    /// Not verified yet (or image changed since)
    Pending,
    /// Duplicate check passed
    Verified,
    /// Duplicate check failed
    Duplicate {
        /// Detector explanation
        reason: String,
    },
}

/// A design accepted for the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSubmission {
    /// Submission identifier
    pub id: Uuid,
    /// Listing title
    pub title: String,
    /// Listing price
    pub price: u32,
    /// Uploaded file name
    pub file_name: String,
    /// SHA-256 of the image bytes
    pub design_hash: String,
    /// When the design was submitted
    pub submitted_at: DateTime<Utc>,
}

/// Form state for one artist upload.
#[derive(Debug, Clone)]
pub struct ArtistUpload {
    image: Option<DesignImage>,
    status: UploadStatus,
    /// Listing title being edited
    pub title: String,
    /// Listing price being edited
    pub price: u32,
}

impl Default for ArtistUpload {
    fn default() -> Self {
        Self {
            image: None,
            status: UploadStatus::Pending,
            title: String::new(),
            price: DEFAULT_DESIGN_PRICE,
        }
    }
}

impl ArtistUpload {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `image`, replacing any previous one and clearing its verdict.
    pub fn attach_image(&mut self, image: DesignImage) {
        self.image = Some(image);
        self.status = UploadStatus::Pending;
    }

    /// Removes the attached image.
    pub fn remove_image(&mut self) {
        self.image = None;
        self.status = UploadStatus::Pending;
    }

    /// The attached image, if any.
    pub const fn image(&self) -> Option<&DesignImage> {
        self.image.as_ref()
    }

    /// Current verification status.
    pub const fn status(&self) -> &UploadStatus {
        &self.status
    }

    /// Starts a duplicate check of the attached image.
    ///
    /// The verdict is not stored automatically; pass it to
    /// [`ArtistUpload::record_verdict`] once the run finishes.
    pub fn start_verification(
        &mut self,
        detector: Arc<dyn DuplicateDetector>,
        step: u8,
    ) -> StudioResult<VerificationRun> {
        let image = self.image.clone().ok_or(StudioError::MissingImage)?;
        self.status = UploadStatus::Pending;
        Ok(VerificationRun::new(detector, image, step))
    }

    /// Stores the outcome of a finished verification run.
    pub fn record_verdict(&mut self, verdict: Verdict) {
        self.status = match verdict {
            Verdict::Unique => UploadStatus::Verified,
            Verdict::Duplicate { reason } => UploadStatus::Duplicate { reason },
        };
    }

    /// Submits the verified design and resets the form.
    ///
    /// Checks, in order: an image is attached, it was verified unique, the
    /// title is not blank, and the price is positive. On failure the form is
    /// left untouched.
    pub fn submit(&mut self) -> StudioResult<DesignSubmission> {
        let image = self.image.as_ref().ok_or(StudioError::MissingImage)?;

        if self.status != UploadStatus::Verified {
            return Err(StudioError::DesignNotVerified);
        }

        let title = self.title.trim();
        if title.is_empty() {
            return Err(StudioError::InvalidSubmission(
                "a title is required".to_string(),
            ));
        }

        if self.price == 0 {
            return Err(StudioError::InvalidSubmission(
                "price must be greater than zero".to_string(),
            ));
        }

        let submission = DesignSubmission {
            id: Uuid::new_v4(),
            title: title.to_string(),
            price: self.price,
            file_name: image.file_name.clone(),
            design_hash: image.digest(),
            submitted_at: Utc::now(),
        };

        info!(
            title = %submission.title,
            hash = %submission.design_hash,
            "design submitted to marketplace"
        );

        *self = Self::default();
        Ok(submission)
    }
}
