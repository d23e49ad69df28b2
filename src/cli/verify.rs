//! Duplicate check and marketplace submission for artist designs.

use crate::cli::common::{format_price, load_config, print_json, CliError, CliResult};
use crate::services::{
    ArtistUpload, DesignImage, DesignSubmission, DuplicateDetector, FixedDuplicateDetector,
    Verdict, VerificationEvent,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Forced outcome of the duplicate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssumedVerdict {
    /// Always unique
    Unique,
    /// Always a duplicate
    Duplicate,
}

/// Check a design image for duplicates and optionally submit it
#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Design image file
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Skip the random detector and force a verdict
    #[arg(long, value_enum, value_name = "VERDICT")]
    pub assume: Option<AssumedVerdict>,

    /// Listing title; submits the design when given
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Listing price (defaults to 999)
    #[arg(long, value_name = "AMOUNT", requires = "title")]
    pub price: Option<u32>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct VerifyResponse {
    file_name: String,
    events: Vec<VerificationEvent>,
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    submission: Option<DesignSubmission>,
}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        let bytes = fs::read(&self.image).map_err(|e| {
            CliError::io(format!("Failed to read image {}: {e}", self.image.display()))
        })?;
        let file_name = self
            .image
            .file_name()
            .map_or_else(|| self.image.display().to_string(), |n| n.to_string_lossy().into_owned());

        let detector: Arc<dyn DuplicateDetector> = match self.assume {
            Some(AssumedVerdict::Unique) => Arc::new(FixedDuplicateDetector::unique()),
            Some(AssumedVerdict::Duplicate) => Arc::new(FixedDuplicateDetector::duplicate(
                "matches an existing marketplace design",
            )),
            None => config.detector(),
        };

        let mut upload = ArtistUpload::new();
        upload.attach_image(DesignImage::new(file_name.clone(), bytes));

        let run = upload.start_verification(detector, config.verification.progress_step)?;
        let mut events = Vec::new();
        let mut verdict = None;
        for event in run {
            if !self.json {
                print_event(&event);
            }
            if let VerificationEvent::Finished { verdict: v } = &event {
                verdict = Some(v.clone());
            }
            events.push(event);
        }
        let verdict =
            verdict.ok_or_else(|| CliError::validation("Verification ended without a verdict"))?;
        upload.record_verdict(verdict.clone());

        let submission = match (&self.title, verdict.is_unique()) {
            (Some(title), true) => {
                upload.title.clone_from(title);
                if let Some(price) = self.price {
                    upload.price = price;
                }
                Some(upload.submit()?)
            }
            _ => None,
        };

        if self.json {
            print_json(&VerifyResponse {
                file_name,
                events,
                verdict: verdict.clone(),
                submission,
            })?;
        } else if let Some(submission) = &submission {
            println!();
            println!("Submitted \"{}\" for {}", submission.title, format_price(submission.price));
            println!("  Id:   {}", submission.id);
            println!("  Hash: {}", submission.design_hash);
        }

        verdict.into_result().map_err(CliError::from)
    }
}

fn print_event(event: &VerificationEvent) {
    match event {
        VerificationEvent::Progress { percent } => println!("Checking... {percent:>3}%"),
        VerificationEvent::Finished { verdict } => println!("Result: {verdict}"),
        VerificationEvent::Cancelled => println!("Cancelled"),
    }
}
