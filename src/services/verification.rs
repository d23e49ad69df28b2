//! Duplicate-design verification for artist uploads.
//!
//! ## Design
//!
//! - Detection sits behind the [`DuplicateDetector`] trait so a real
//!   content-addressed detector can replace the random one
//! - A check is a [`VerificationRun`]: an iterator that yields fixed-size
//!   progress ticks up to 100% and then exactly one terminal event
//! - The detector is consulted only after the final tick
//! - Runs can be cancelled between ticks; without cancellation a run always
//!   finishes after `ceil(100 / step)` ticks
//!
//! ## Mock Support
//!
//! [`FixedDuplicateDetector`] returns a preset verdict for tests and for the
//! CLI's `--assume` flag.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{StudioError, StudioResult};

/// Default progress increment, in percent.
pub const DEFAULT_PROGRESS_STEP: u8 = 10;

/// Default probability that the random detector reports a duplicate.
pub const DEFAULT_DUPLICATE_PROBABILITY: f64 = 0.1;

/// Reason reported by the random detector.
const SIMILAR_DESIGN_REASON: &str = "Design is too similar to an existing design";

/// An uploaded design image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignImage {
    /// Original file name
    pub file_name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl DesignImage {
    /// Creates an image from a file name and its contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Lowercase hex SHA-256 of the image bytes.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }
}

/// Outcome of a duplicate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// No matching design found
    Unique,
    /// The design matches an existing one
    Duplicate {
        /// Explanation shown to the artist
        reason: String,
    },
}

impl Verdict {
    /// True for [`Verdict::Unique`].
    pub const fn is_unique(&self) -> bool {
        matches!(self, Self::Unique)
    }

    /// `Ok(())` when unique, `DuplicateDesign` otherwise.
    pub fn into_result(self) -> StudioResult<()> {
        match self {
            Self::Unique => Ok(()),
            Self::Duplicate { reason } => Err(StudioError::DuplicateDesign { reason }),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique => write!(f, "unique"),
            Self::Duplicate { reason } => write!(f, "duplicate ({reason})"),
        }
    }
}

/// Trait for duplicate detectors, allowing mock injection for tests.
pub trait DuplicateDetector: Send + Sync {
    /// Decides whether `image` duplicates an existing design.
    fn assess(&self, image: &DesignImage) -> Verdict;
}

/// Detector that reports a duplicate with a fixed probability.
///
/// This stands in for a perceptual-hash lookup; it ignores the image content.
#[derive(Debug, Clone, Copy)]
pub struct RandomDuplicateDetector {
    /// Chance of a duplicate verdict, clamped to `0.0..=1.0`
    pub duplicate_probability: f64,
}

impl RandomDuplicateDetector {
    /// Creates a detector with the given duplicate probability.
    pub const fn new(duplicate_probability: f64) -> Self {
        Self {
            duplicate_probability,
        }
    }
}

impl Default for RandomDuplicateDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DUPLICATE_PROBABILITY)
    }
}

impl DuplicateDetector for RandomDuplicateDetector {
    fn assess(&self, image: &DesignImage) -> Verdict {
        let probability = if self.duplicate_probability.is_nan() {
            0.0
        } else {
            self.duplicate_probability.clamp(0.0, 1.0)
        };

        if rand::thread_rng().gen_bool(probability) {
            debug!(file = %image.file_name, "random detector flagged duplicate");
            Verdict::Duplicate {
                reason: SIMILAR_DESIGN_REASON.to_string(),
            }
        } else {
            Verdict::Unique
        }
    }
}

/// Mock detector that always returns the same verdict.
#[derive(Debug, Clone)]
pub struct FixedDuplicateDetector {
    verdict: Verdict,
}

impl FixedDuplicateDetector {
    /// Detector that always answers `verdict`.
    pub const fn new(verdict: Verdict) -> Self {
        Self { verdict }
    }

    /// Detector that always reports a unique design.
    pub const fn unique() -> Self {
        Self::new(Verdict::Unique)
    }

    /// Detector that always reports a duplicate with `reason`.
    pub fn duplicate(reason: impl Into<String>) -> Self {
        Self::new(Verdict::Duplicate {
            reason: reason.into(),
        })
    }
}

impl DuplicateDetector for FixedDuplicateDetector {
    fn assess(&self, _image: &DesignImage) -> Verdict {
        self.verdict.clone()
    }
}

/// An event produced by a [`VerificationRun`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VerificationEvent {
    /// Progress percentage after a tick (never above 100)
    Progress {
        /// Percent complete
        percent: u8,
    },
    /// The check finished with a verdict
    Finished {
        /// Detector result
        verdict: Verdict,
    },
    /// The check was cancelled before finishing
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Cancelling,
    Done,
}

/// A staged duplicate check, consumed as an iterator of events.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tailornova::services::verification::{
///     DesignImage, FixedDuplicateDetector, VerificationEvent, VerificationRun, Verdict,
/// };
///
/// let image = DesignImage::new("tiger.png", vec![1_u8, 2, 3]);
/// let run = VerificationRun::new(Arc::new(FixedDuplicateDetector::unique()), image, 25);
/// let events: Vec<_> = run.collect();
///
/// assert_eq!(events.len(), 5);
/// assert_eq!(events[3], VerificationEvent::Progress { percent: 100 });
/// assert_eq!(events[4], VerificationEvent::Finished { verdict: Verdict::Unique });
/// ```
pub struct VerificationRun {
    detector: Arc<dyn DuplicateDetector>,
    image: DesignImage,
    step: u8,
    progress: u8,
    state: RunState,
}

impl VerificationRun {
    /// Prepares a run. A `step` of 0 is treated as 1; values above 100 as 100.
    pub fn new(detector: Arc<dyn DuplicateDetector>, image: DesignImage, step: u8) -> Self {
        Self {
            detector,
            image,
            step: step.clamp(1, 100),
            progress: 0,
            state: RunState::Running,
        }
    }

    /// Current progress percentage.
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// The image under verification.
    pub const fn image(&self) -> &DesignImage {
        &self.image
    }

    /// True once the terminal event has been yielded.
    pub fn is_done(&self) -> bool {
        self.state == RunState::Done
    }

    /// Number of progress ticks a complete run yields.
    pub fn total_ticks(&self) -> usize {
        usize::from(100_u8.div_ceil(self.step))
    }

    /// Requests cancellation. The next event is `Cancelled`, then the run ends.
    /// Has no effect on a finished run.
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Cancelling;
        }
    }

    /// Drives the run to its end, returning the verdict unless cancelled.
    pub fn finish(self) -> Option<Verdict> {
        self.filter_map(|event| match event {
            VerificationEvent::Finished { verdict } => Some(verdict),
            _ => None,
        })
        .last()
    }
}

impl Iterator for VerificationRun {
    type Item = VerificationEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            RunState::Done => None,
            RunState::Cancelling => {
                self.state = RunState::Done;
                info!(file = %self.image.file_name, progress = self.progress, "verification cancelled");
                Some(VerificationEvent::Cancelled)
            }
            RunState::Running if self.progress < 100 => {
                self.progress = self.progress.saturating_add(self.step).min(100);
                debug!(file = %self.image.file_name, progress = self.progress, "verification progress");
                Some(VerificationEvent::Progress {
                    percent: self.progress,
                })
            }
            RunState::Running => {
                self.state = RunState::Done;
                let verdict = self.detector.assess(&self.image);
                info!(file = %self.image.file_name, %verdict, "verification finished");
                Some(VerificationEvent::Finished { verdict })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDetector {
        calls: AtomicUsize,
    }

    impl DuplicateDetector for CountingDetector {
        fn assess(&self, _image: &DesignImage) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Verdict::Unique
        }
    }

    fn image() -> DesignImage {
        DesignImage::new("design.png", b"not really a png".to_vec())
    }

    #[test]
    fn test_default_run_has_ten_ticks_then_verdict() {
        let run = VerificationRun::new(
            Arc::new(FixedDuplicateDetector::unique()),
            image(),
            DEFAULT_PROGRESS_STEP,
        );
        assert_eq!(run.total_ticks(), 10);

        let events: Vec<_> = run.collect();
        assert_eq!(events.len(), 11);
        for (i, event) in events.iter().take(10).enumerate() {
            let expected = u8::try_from((i + 1) * 10).unwrap();
            assert_eq!(*event, VerificationEvent::Progress { percent: expected });
        }
        assert_eq!(
            events[10],
            VerificationEvent::Finished {
                verdict: Verdict::Unique
            }
        );
    }

    #[test]
    fn test_uneven_step_stops_at_100() {
        let run = VerificationRun::new(Arc::new(FixedDuplicateDetector::unique()), image(), 30);
        let percents: Vec<u8> = run
            .filter_map(|event| match event {
                VerificationEvent::Progress { percent } => Some(percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents, vec![30, 60, 90, 100]);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let run = VerificationRun::new(Arc::new(FixedDuplicateDetector::unique()), image(), 0);
        assert_eq!(run.total_ticks(), 100);
        assert_eq!(run.count(), 101);
    }

    #[test]
    fn test_detector_consulted_once_after_last_tick() {
        let detector = Arc::new(CountingDetector {
            calls: AtomicUsize::new(0),
        });
        let mut run = VerificationRun::new(detector.clone(), image(), 50);

        run.next();
        run.next();
        assert_eq!(run.progress(), 100);
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);

        run.next();
        assert_eq!(detector.calls.load(Ordering::SeqCst), 1);
        assert!(run.is_done());
        assert!(run.next().is_none());
        assert_eq!(detector.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_mid_run() {
        let mut run = VerificationRun::new(Arc::new(FixedDuplicateDetector::unique()), image(), 10);
        run.next();
        run.next();
        run.cancel();

        assert_eq!(run.next(), Some(VerificationEvent::Cancelled));
        assert!(run.next().is_none());
        assert_eq!(run.progress(), 20);
    }

    #[test]
    fn test_cancel_after_finish_is_noop() {
        let mut run = VerificationRun::new(Arc::new(FixedDuplicateDetector::unique()), image(), 100);
        run.next();
        run.next();
        run.cancel();
        assert!(run.next().is_none());
    }

    #[test]
    fn test_finish_returns_verdict() {
        let run = VerificationRun::new(
            Arc::new(FixedDuplicateDetector::duplicate("matches #42")),
            image(),
            10,
        );
        let verdict = run.finish().unwrap();
        assert_eq!(
            verdict.into_result().unwrap_err(),
            StudioError::DuplicateDesign {
                reason: "matches #42".to_string()
            }
        );
    }

    #[test]
    fn test_finish_after_cancel_is_none() {
        let mut run = VerificationRun::new(Arc::new(FixedDuplicateDetector::unique()), image(), 10);
        run.cancel();
        assert!(run.finish().is_none());
    }

    #[test]
    fn test_random_detector_extremes() {
        let always = RandomDuplicateDetector::new(1.0);
        let never = RandomDuplicateDetector::new(0.0);
        for _ in 0..20 {
            assert!(!always.assess(&image()).is_unique());
            assert!(never.assess(&image()).is_unique());
        }
    }

    #[test]
    fn test_random_detector_clamps_probability() {
        assert!(!RandomDuplicateDetector::new(7.5).assess(&image()).is_unique());
        assert!(RandomDuplicateDetector::new(-1.0).assess(&image()).is_unique());
        assert!(RandomDuplicateDetector::new(f64::NAN).assess(&image()).is_unique());
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        let image = DesignImage::new("empty.png", Vec::<u8>::new());
        assert_eq!(
            image.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
