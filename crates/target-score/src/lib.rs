//! High-level facade crate for the `target-score-*` workspace.
//!
//! Given a photograph of a paper shooting target, the pipeline locates
//! the circular impact marks left by projectiles, scores each one
//! against a configurable ring table, and renders an annotated copy of
//! the photo with ring guides, hole markers and score labels.
//!
//! ## Quickstart
//!
//! ```no_run
//! use target_score::{analyze, AnalyzeConfig};
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("target.jpg")?.decode()?.to_rgb8();
//! let result = analyze(&img, &AnalyzeConfig::default())?;
//! println!("{} holes, total {}", result.holes.len(), result.total_score);
//! result.annotated.save("annotated.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `target_score::core`: hole/center types, ring tables, scoring rules.
//! - `target_score::hough`: gradient-vote circular Hough detector.
//! - [`preprocess`]: grayscale conversion and edge-preserving smoothing.
//! - [`annotate`]: overlay rendering on the original photo.
//! - [`analyze`]: the single-pass pipeline entry point.
//!
//! The pipeline is stateless and synchronous: each invocation owns its
//! working buffers, so concurrent calls on independent images need no
//! coordination. Callers are expected to pre-downscale very large
//! photos (reference policy: 2048 px on the longer side) and to run the
//! call off any interactive thread; neither is enforced here.

pub use target_score_core as core;
pub use target_score_hough as hough;

pub use target_score_core::{
    estimate_center, score_hole, score_holes, DetectedHole, ScoreZone, ScoringParams, TargetCenter,
    ZoneTable, ZoneTableError,
};
pub use target_score_hough::HoughParams;

pub mod annotate;
pub mod preprocess;

mod pipeline;

pub use annotate::AnnotateParams;
pub use pipeline::{analyze, AnalysisResult, AnalyzeConfig, AnalyzeError, ScoreSummary};
pub use preprocess::BlurParams;
