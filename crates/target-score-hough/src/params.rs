use serde::{Deserialize, Serialize};

/// Tunables for the gradient Hough detector.
///
/// These are empirically tuned for handheld photos of paper targets
/// taken at roughly frame-filling distance; recalibrate per camera
/// resolution and shooting distance rather than editing the algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Inverse accumulator resolution relative to the input image
    /// (1.0 = full resolution, 2.0 = half). Coarser grids are cheaper
    /// and merge nearby votes.
    pub accumulator_scale: f32,
    /// Minimum center-to-center distance in pixels between accepted
    /// circles; suppresses duplicate detections of the same hole.
    pub min_center_distance: f32,
    /// Absolute gradient magnitude above which a pixel counts as a
    /// strong edge.
    pub edge_threshold: f32,
    /// Minimum accumulator votes for a candidate center. Lower is more
    /// permissive: recall up, precision down.
    pub vote_threshold: f32,
    /// Smallest accepted circle radius in pixels.
    pub min_radius: f32,
    /// Largest accepted circle radius in pixels.
    pub max_radius: f32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            accumulator_scale: 1.2,
            min_center_distance: 20.0,
            edge_threshold: 100.0,
            vote_threshold: 30.0,
            min_radius: 5.0,
            max_radius: 40.0,
        }
    }
}
