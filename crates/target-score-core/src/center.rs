use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::hole::DetectedHole;

/// Scoring origin of the ring system, one per analysis run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCenter {
    pub center: Point2<f32>,
}

impl TargetCenter {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            center: Point2::new(x, y),
        }
    }
}

/// Estimate the scoring origin for an image of the given dimensions.
///
/// Reference policy: the exact geometric image center, assuming the
/// photographed target is centered and fills most of the frame. The
/// detected holes are accepted (and currently ignored) so that a future
/// policy can search for the bullseye itself without changing the
/// signature consumers depend on.
pub fn estimate_center(width: u32, height: u32, _holes: &[DetectedHole]) -> TargetCenter {
    TargetCenter::new(width as f32 / 2.0, height as f32 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_geometric_midpoint() {
        let c = estimate_center(1000, 800, &[]);
        assert_eq!(c.center, Point2::new(500.0, 400.0));
    }

    #[test]
    fn holes_do_not_move_the_center() {
        let holes = vec![DetectedHole::new(10.0, 10.0, 4.0)];
        let c = estimate_center(640, 480, &holes);
        assert_eq!(c, estimate_center(640, 480, &[]));
    }
}
