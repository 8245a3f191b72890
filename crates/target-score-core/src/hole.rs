use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One circular impact mark located by the detector.
///
/// Coordinates and radius are in pixel units, in the frame of the image
/// the detector ran on. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedHole {
    /// Center of the mark in image coordinates.
    pub center: Point2<f32>,
    /// Detected mark radius in pixels.
    pub radius: f32,
}

impl DetectedHole {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Point2::new(x, y),
            radius,
        }
    }
}
