use image::GrayImage;
use log::debug;
use target_score_core::DetectedHole;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::HoughParams;

/// Minimum |cos| between an edge gradient and the edge-to-center
/// direction for the edge pixel to support a candidate's radius vote.
const RADIAL_ALIGNMENT: f32 = 0.85;

struct EdgePoint {
    x: f32,
    y: f32,
    /// Unit gradient direction.
    dx: f32,
    dy: f32,
}

/// Detect candidate circular marks in a filtered grayscale image.
///
/// Returns holes ordered by accumulator support (strongest first). An
/// empty result is a valid outcome, not an error; the detector makes no
/// attempt to tell true bullet holes from incidental circular artifacts.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(image, params), fields(width = image.width(), height = image.height()))
)]
pub fn find_circles(image: &GrayImage, params: &HoughParams) -> Vec<DetectedHole> {
    let (w, h) = image.dimensions();
    if w < 4 || h < 4 || params.max_radius < params.min_radius {
        return Vec::new();
    }

    let edges = collect_edge_points(image, params.edge_threshold);
    debug!("hough: {} strong-edge pixels", edges.len());
    if edges.is_empty() {
        return Vec::new();
    }

    let scale = params.accumulator_scale.max(1.0);
    let accum = vote_centers(&edges, w, h, scale, params);
    let peaks = extract_peaks(&accum, scale, params);
    debug!("hough: {} centers after suppression", peaks.len());

    peaks
        .into_iter()
        .filter_map(|(cx, cy, votes)| {
            estimate_radius(&edges, cx, cy, params).map(|radius| {
                debug!("hough: circle at ({cx:.1}, {cy:.1}) r={radius:.1} votes={votes:.0}");
                DetectedHole::new(cx, cy, radius)
            })
        })
        .collect()
}

fn collect_edge_points(image: &GrayImage, edge_threshold: f32) -> Vec<EdgePoint> {
    let gx = imageproc::gradients::horizontal_sobel(image);
    let gy = imageproc::gradients::vertical_sobel(image);
    let gx_raw = gx.as_raw();
    let gy_raw = gy.as_raw();

    let w = image.width() as usize;
    let threshold_sq = edge_threshold * edge_threshold;
    let mut edges = Vec::new();
    for (idx, (&gxv, &gyv)) in gx_raw.iter().zip(gy_raw.iter()).enumerate() {
        let gxv = gxv as f32;
        let gyv = gyv as f32;
        let mag_sq = gxv * gxv + gyv * gyv;
        if mag_sq < threshold_sq {
            continue;
        }
        let inv_mag = 1.0 / mag_sq.sqrt();
        edges.push(EdgePoint {
            x: (idx % w) as f32,
            y: (idx / w) as f32,
            dx: gxv * inv_mag,
            dy: gyv * inv_mag,
        });
    }
    edges
}

struct Accumulator {
    width: usize,
    height: usize,
    votes: Vec<f32>,
}

/// Deposit one vote with bilinear interpolation. `x`/`y` must satisfy
/// `0 <= x < width - 1` and `0 <= y < height - 1`.
#[inline]
fn bilinear_deposit(accum: &mut Accumulator, x: f32, y: f32, weight: f32) {
    let x0 = x as usize;
    let y0 = y as usize;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;
    let base = y0 * accum.width + x0;
    accum.votes[base] += weight * (1.0 - fx) * (1.0 - fy);
    accum.votes[base + 1] += weight * fx * (1.0 - fy);
    accum.votes[base + accum.width] += weight * (1.0 - fx) * fy;
    accum.votes[base + accum.width + 1] += weight * fx * fy;
}

/// Cast votes along both gradient directions of every strong edge pixel,
/// once per candidate radius. Circular marks concentrate votes at their
/// centers because boundary gradients converge radially.
fn vote_centers(
    edges: &[EdgePoint],
    width: u32,
    height: u32,
    scale: f32,
    params: &HoughParams,
) -> Accumulator {
    let aw = (width as f32 / scale).ceil() as usize + 1;
    let ah = (height as f32 / scale).ceil() as usize + 1;
    let mut accum = Accumulator {
        width: aw,
        height: ah,
        votes: vec![0.0; aw * ah],
    };

    let x_limit = (aw - 1) as f32;
    let y_limit = (ah - 1) as f32;
    let inv_scale = 1.0 / scale;

    let mut radii = Vec::new();
    let mut r = params.min_radius;
    while r <= params.max_radius {
        radii.push(r);
        r += 1.0;
    }

    for e in edges {
        for &r in &radii {
            for sign in [1.0f32, -1.0] {
                let vx = (e.x + sign * e.dx * r) * inv_scale;
                let vy = (e.y + sign * e.dy * r) * inv_scale;
                if vx >= 0.0 && vx < x_limit && vy >= 0.0 && vy < y_limit {
                    bilinear_deposit(&mut accum, vx, vy, 1.0);
                }
            }
        }
    }
    accum
}

/// Local-maximum cells above the vote threshold, refined to subcell
/// precision by a 3x3 centroid, then greedily thinned so no two accepted
/// centers lie closer than `min_center_distance` in image space.
///
/// Returns `(cx, cy, votes)` in image coordinates, strongest first.
fn extract_peaks(accum: &Accumulator, scale: f32, params: &HoughParams) -> Vec<(f32, f32, f32)> {
    let (aw, ah) = (accum.width, accum.height);
    if aw < 3 || ah < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    for y in 1..ah - 1 {
        for x in 1..aw - 1 {
            let idx = y * aw + x;
            let val = accum.votes[idx];
            if val < params.vote_threshold {
                continue;
            }
            let mut is_max = true;
            'nbhd: for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nidx = (idx as i32 + dy * aw as i32 + dx) as usize;
                    let nval = accum.votes[nidx];
                    // Tie-break plateaus by index so exactly one cell wins.
                    if nval > val || (nval == val && nidx < idx) {
                        is_max = false;
                        break 'nbhd;
                    }
                }
            }
            if !is_max {
                continue;
            }

            // Vote-weighted 3x3 centroid for subcell center refinement.
            let mut sum = 0.0f32;
            let mut sx = 0.0f32;
            let mut sy = 0.0f32;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let nidx = (idx as i32 + dy * aw as i32 + dx) as usize;
                    let v = accum.votes[nidx];
                    sum += v;
                    sx += v * (x as i32 + dx) as f32;
                    sy += v * (y as i32 + dy) as f32;
                }
            }
            let (px, py) = if sum > 0.0 {
                (sx / sum, sy / sum)
            } else {
                (x as f32, y as f32)
            };
            peaks.push((px * scale, py * scale, val));
        }
    }

    peaks.sort_by(|a, b| b.2.total_cmp(&a.2));

    let min_dist_sq = params.min_center_distance * params.min_center_distance;
    let mut accepted: Vec<(f32, f32, f32)> = Vec::new();
    for (px, py, votes) in peaks {
        let too_close = accepted.iter().any(|&(ax, ay, _)| {
            let dx = ax - px;
            let dy = ay - py;
            dx * dx + dy * dy < min_dist_sq
        });
        if !too_close {
            accepted.push((px, py, votes));
        }
    }
    accepted
}

/// Second Hough stage: histogram the center distance of radially aligned
/// edge pixels and take the modal bin (refined by a weighted mean over
/// its immediate neighbors). `None` when no edge pixel supports any
/// radius in range.
fn estimate_radius(edges: &[EdgePoint], cx: f32, cy: f32, params: &HoughParams) -> Option<f32> {
    let bins = (params.max_radius - params.min_radius).round() as usize + 1;
    let mut histogram = vec![0u32; bins];

    for e in edges {
        let dx = cx - e.x;
        let dy = cy - e.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < params.min_radius - 0.5 || dist > params.max_radius + 0.5 || dist < 1e-3 {
            continue;
        }
        let cos = (dx * e.dx + dy * e.dy) / dist;
        if cos.abs() < RADIAL_ALIGNMENT {
            continue;
        }
        let bin = ((dist - params.min_radius).round().max(0.0) as usize).min(bins - 1);
        histogram[bin] += 1;
    }

    let (best_bin, &best_count) = histogram
        .iter()
        .enumerate()
        .max_by_key(|&(i, &c)| (c, std::cmp::Reverse(i)))?;
    if best_count == 0 {
        return None;
    }

    let mut weight = 0.0f32;
    let mut weighted = 0.0f32;
    for bin in best_bin.saturating_sub(1)..(best_bin + 2).min(bins) {
        let c = histogram[bin] as f32;
        weight += c;
        weighted += c * (params.min_radius + bin as f32);
    }
    Some(weighted / weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Synthetic photo fragment: dark filled disc on bright paper.
    fn make_disc_image(w: u32, h: u32, cx: f32, cy: f32, radius: f32) -> GrayImage {
        let mut img = GrayImage::from_pixel(w, h, Luma([220u8]));
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if (dx * dx + dy * dy).sqrt() <= radius {
                    img.put_pixel(x, y, Luma([25u8]));
                }
            }
        }
        img
    }

    fn test_params() -> HoughParams {
        HoughParams {
            min_center_distance: 15.0,
            vote_threshold: 25.0,
            ..HoughParams::default()
        }
    }

    #[test]
    fn finds_a_single_dark_disc() {
        let (cx, cy, r) = (60.0, 45.0, 12.0);
        let img = make_disc_image(120, 90, cx, cy, r);
        let holes = find_circles(&img, &test_params());

        assert!(!holes.is_empty(), "disc should be detected");
        let best = &holes[0];
        let err = ((best.center.x - cx).powi(2) + (best.center.y - cy).powi(2)).sqrt();
        assert!(
            err < 3.0,
            "center ({}, {}) should be within 3 px of ({cx}, {cy})",
            best.center.x,
            best.center.y,
        );
        assert!(
            (best.radius - r).abs() < 3.0,
            "radius {} should be near {r}",
            best.radius
        );
    }

    #[test]
    fn finds_two_separated_discs() {
        let mut img = make_disc_image(200, 100, 50.0, 50.0, 10.0);
        for y in 0..100u32 {
            for x in 0..200u32 {
                let dx = x as f32 - 150.0;
                let dy = y as f32 - 50.0;
                if (dx * dx + dy * dy).sqrt() <= 8.0 {
                    img.put_pixel(x, y, Luma([25u8]));
                }
            }
        }
        let holes = find_circles(&img, &test_params());
        let near = |cx: f32, cy: f32| {
            holes.iter().any(|h| {
                ((h.center.x - cx).powi(2) + (h.center.y - cy).powi(2)).sqrt() < 4.0
            })
        };
        assert!(near(50.0, 50.0), "left disc missing: {holes:?}");
        assert!(near(150.0, 50.0), "right disc missing: {holes:?}");
    }

    #[test]
    fn blank_image_yields_nothing() {
        let img = GrayImage::from_pixel(100, 100, Luma([200u8]));
        assert!(find_circles(&img, &HoughParams::default()).is_empty());
    }

    #[test]
    fn tiny_image_yields_nothing() {
        let img = GrayImage::from_pixel(3, 3, Luma([0u8]));
        assert!(find_circles(&img, &HoughParams::default()).is_empty());
    }

    #[test]
    fn min_distance_suppresses_duplicate_centers() {
        let img = make_disc_image(120, 90, 60.0, 45.0, 12.0);
        let mut params = test_params();
        params.min_center_distance = 60.0;
        let holes = find_circles(&img, &params);
        assert!(holes.len() <= 1, "duplicates should be suppressed: {holes:?}");
    }

    #[test]
    fn radius_outside_range_is_ignored() {
        // Disc far larger than max_radius: its rim votes never converge
        // inside the accepted radius band.
        let img = make_disc_image(300, 300, 150.0, 150.0, 100.0);
        let holes = find_circles(&img, &test_params());
        for hole in &holes {
            assert!(hole.radius <= HoughParams::default().max_radius + 1.0);
        }
    }
}
