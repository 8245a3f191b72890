use serde::{Deserialize, Serialize};

use crate::center::TargetCenter;
use crate::hole::DetectedHole;
use crate::zones::ZoneTable;

/// Scoring configuration: ring table plus the frame-fill assumption used
/// to estimate the target's pixel diameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Fraction of the shorter image dimension the target is assumed to
    /// occupy. The photographed sheet is expected to be centered and to
    /// fill most of the frame.
    pub fill_ratio: f32,
    pub table: ZoneTable,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            fill_ratio: 0.9,
            table: ZoneTable::default(),
        }
    }
}

/// Estimated target diameter in pixels for an image of the given size.
#[inline]
pub fn estimated_target_diameter(width: u32, height: u32, fill_ratio: f32) -> f32 {
    fill_ratio * width.min(height) as f32
}

/// Score a single hole against the ring table.
///
/// Distance from the hole center to the target center is corrected by
/// the hole's own radius when edge breaking is enabled: a shot whose
/// visible mark crosses a ring line is credited the inner ring, as in
/// standard competitive adjudication. A hole wider than its distance to
/// center yields a negative corrected distance, which trivially sits
/// inside every ring, so the innermost ring wins.
pub fn score_hole(
    hole: &DetectedHole,
    center: &TargetCenter,
    width: u32,
    height: u32,
    params: &ScoringParams,
) -> u32 {
    let diameter = estimated_target_diameter(width, height, params.fill_ratio);
    let d = (hole.center - center.center).norm();
    let edge_distance = if params.table.edge_breaking {
        d - hole.radius
    } else {
        d
    };

    // A center sitting exactly on a ring line belongs to the outer ring;
    // only a mark whose edge breaks the line is pulled inward.
    for zone in &params.table.zones {
        if edge_distance < diameter * zone.outer_ratio {
            return zone.points;
        }
    }
    0
}

/// Score every hole, preserving detector order. `scores[i]` belongs to
/// `holes[i]`.
pub fn score_holes(
    holes: &[DetectedHole],
    center: &TargetCenter,
    width: u32,
    height: u32,
    params: &ScoringParams,
) -> Vec<u32> {
    holes
        .iter()
        .map(|hole| score_hole(hole, center, width, height, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aqt_params() -> ScoringParams {
        ScoringParams {
            fill_ratio: 0.9,
            table: ZoneTable::appleseed_aqt(),
        }
    }

    // 1000x1000 image: diameter 900, ring boundaries 112.5 / 225 / 450.
    const W: u32 = 1000;
    const H: u32 = 1000;

    fn center() -> TargetCenter {
        TargetCenter::new(500.0, 500.0)
    }

    #[test]
    fn aqt_reference_scenario() {
        let p = aqt_params();
        let c = center();
        // edge distance 100 - 20 = 80 <= 112.5
        assert_eq!(score_hole(&DetectedHole::new(600.0, 500.0, 20.0), &c, W, H, &p), 5);
        // edge distance 200 - 5 = 195 <= 225
        assert_eq!(score_hole(&DetectedHole::new(700.0, 500.0, 5.0), &c, W, H, &p), 4);
        // edge distance 500 > 450
        assert_eq!(score_hole(&DetectedHole::new(1000.0, 500.0, 0.0), &c, W, H, &p), 0);
    }

    #[test]
    fn edge_breaking_pulls_a_boundary_shot_inward() {
        let p = aqt_params();
        let c = center();
        // Center exactly on the 5-ring line with zero radius belongs to
        // the 4-point ring; the same hole with a visible mark radius
        // breaks the line and is credited 5.
        let on_line = DetectedHole::new(500.0 + 112.5, 500.0, 0.0);
        assert_eq!(score_hole(&on_line, &c, W, H, &p), 4);
        let breaking = DetectedHole::new(500.0 + 112.5, 500.0, 1.0);
        assert_eq!(score_hole(&breaking, &c, W, H, &p), 5);
    }

    #[test]
    fn without_edge_breaking_radius_is_ignored() {
        let mut p = aqt_params();
        p.table.edge_breaking = false;
        let c = center();
        let hole = DetectedHole::new(500.0 + 112.6, 500.0, 10.0);
        assert_eq!(score_hole(&hole, &c, W, H, &p), 4);
    }

    #[test]
    fn hole_swallowing_the_center_scores_innermost() {
        let p = aqt_params();
        let c = center();
        // Radius exceeds distance: negative corrected distance.
        let hole = DetectedHole::new(505.0, 500.0, 30.0);
        assert_eq!(score_hole(&hole, &c, W, H, &p), 5);
    }

    #[test]
    fn score_never_increases_with_distance() {
        let p = aqt_params();
        let c = center();
        let mut last = u32::MAX;
        for step in 0..200 {
            let d = step as f32 * 3.0;
            let hole = DetectedHole::new(500.0 + d, 500.0, 4.0);
            let s = score_hole(&hole, &c, W, H, &p);
            assert!(s <= last, "score rose from {last} to {s} at distance {d}");
            last = s;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn diameter_uses_the_shorter_dimension() {
        use approx::assert_relative_eq;
        assert_relative_eq!(estimated_target_diameter(1000, 2000, 0.9), 900.0);
        assert_relative_eq!(estimated_target_diameter(2000, 1000, 0.9), 900.0);
    }

    #[test]
    fn parallel_scores_follow_detector_order() {
        let p = aqt_params();
        let c = center();
        let holes = vec![
            DetectedHole::new(1000.0, 500.0, 0.0),
            DetectedHole::new(600.0, 500.0, 20.0),
        ];
        assert_eq!(score_holes(&holes, &c, W, H, &p), vec![0, 5]);
    }

    #[test]
    fn linear_bands_score_a_center_shot_ten() {
        let p = ScoringParams {
            fill_ratio: 0.9,
            table: ZoneTable::linear_bands(),
        };
        let c = center();
        let hole = DetectedHole::new(505.0, 500.0, 3.0);
        assert_eq!(score_hole(&hole, &c, W, H, &p), 10);
        // Beyond the outermost band (> 450 px) scores 0.
        let wide = DetectedHole::new(980.0, 500.0, 3.0);
        assert_eq!(score_hole(&wide, &c, W, H, &p), 0);
    }
}
