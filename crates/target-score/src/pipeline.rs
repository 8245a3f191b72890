use image::RgbImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use target_score_core::{estimate_center, score_holes, DetectedHole, ScoringParams, TargetCenter};
use target_score_hough::{find_circles, HoughParams};

use crate::annotate::{annotate, AnnotateParams};
use crate::preprocess::{blur, to_grayscale, BlurParams};

/// Full configuration surface of one analysis run.
///
/// Every tunable the pipeline consumes lives here so deployments can
/// recalibrate per camera resolution and shooting distance without
/// recompiling; the defaults are the tuned reference constants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub blur: BlurParams,
    pub hough: HoughParams,
    pub scoring: ScoringParams,
    pub annotate: AnnotateParams,
}

/// Errors fatal to a single analysis invocation.
///
/// Zero detected holes, zero scores and the center-estimation fallback
/// are all ordinary results, never errors.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error("invalid input image (width={width}, height={height})")]
    InvalidImage { width: u32, height: u32 },
}

/// Everything one analysis run produces.
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    /// Copy of the input photo with ring guides, hole markers and score
    /// labels rendered on top.
    pub annotated: RgbImage,
    /// Detected holes, in detector output order.
    pub holes: Vec<DetectedHole>,
    /// Per-hole scores, parallel to `holes`.
    pub scores: Vec<u32>,
    /// Sum of `scores`.
    pub total_score: u32,
    /// Scoring origin the run used.
    pub target_center: TargetCenter,
}

impl AnalysisResult {
    /// Image-free view of the result, for JSON output and logging.
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            holes: self.holes.clone(),
            scores: self.scores.clone(),
            total_score: self.total_score,
            target_center: self.target_center,
        }
    }
}

/// Serializable per-run score report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub holes: Vec<DetectedHole>,
    pub scores: Vec<u32>,
    pub total_score: u32,
    pub target_center: TargetCenter,
}

/// Analyze one photograph of a paper target.
///
/// Single-pass and stateless: preprocess, detect circles, estimate the
/// scoring origin, score every hole, render the annotated copy. The
/// intermediate grayscale buffers are dropped as soon as the detector
/// has consumed them; only the annotated copy and the score data
/// survive into the result.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, config), fields(width = image.width(), height = image.height()))
)]
pub fn analyze(image: &RgbImage, config: &AnalyzeConfig) -> Result<AnalysisResult, AnalyzeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || image.as_raw().is_empty() {
        return Err(AnalyzeError::InvalidImage { width, height });
    }

    let holes = {
        let gray = to_grayscale(image);
        let filtered = blur(&gray, &config.blur);
        drop(gray);
        find_circles(&filtered, &config.hough)
    };
    debug!("pipeline: {} candidate holes", holes.len());

    let target_center = estimate_center(width, height, &holes);
    let scores = score_holes(&holes, &target_center, width, height, &config.scoring);
    let total_score: u32 = scores.iter().sum();
    info!(
        "pipeline: {} holes scored, total {total_score}",
        holes.len()
    );

    let annotated = annotate(
        image,
        &holes,
        &scores,
        &target_center,
        &config.scoring,
        &config.annotate,
    );

    Ok(AnalysisResult {
        annotated,
        holes,
        scores,
        total_score,
        target_center,
    })
}
