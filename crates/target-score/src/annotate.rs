//! Overlay rendering: ring guides, hole markers, crosshairs and score
//! labels drawn onto a copy of the original photo.
//!
//! Draw order is background to foreground on purpose: ring guides go
//! down first, per-hole marks and labels may occlude them. All
//! primitives clip at the image border, so holes detected near the edge
//! never make rendering fatal.

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

use target_score_core::{
    estimated_target_diameter, DetectedHole, ScoringParams, TargetCenter,
};

/// Ring guide palette, innermost ring first; cycles if the table is
/// longer.
const ZONE_COLORS: [Rgb<u8>; 5] = [
    Rgb([230, 60, 60]),
    Rgb([240, 160, 40]),
    Rgb([60, 170, 60]),
    Rgb([70, 110, 230]),
    Rgb([170, 70, 200]),
];

const CENTER_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
const HOLE_COLOR: Rgb<u8> = Rgb([255, 40, 40]);
const CALIBER_COLOR: Rgb<u8> = Rgb([40, 90, 255]);
const CROSSHAIR_COLOR: Rgb<u8> = Rgb([40, 200, 90]);
const LABEL_FG: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_BG: Rgb<u8> = Rgb([0, 0, 0]);

/// Rendering parameters for the annotated output image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateParams {
    /// Radius in pixels of the fixed caliber reference circle drawn at
    /// every hole. A constant, independent of the detected radius, so a
    /// glance compares the detector's estimate against the known
    /// projectile diameter.
    pub caliber_radius: f32,
    /// Half-length in pixels of each crosshair arm.
    pub crosshair_half_len: f32,
    /// Integer upscale factor for the 5x7 digit glyphs in score labels.
    pub label_scale: u32,
}

impl Default for AnnotateParams {
    fn default() -> Self {
        Self {
            caliber_radius: 15.0,
            crosshair_half_len: 12.0,
            label_scale: 2,
        }
    }
}

/// Render all overlays onto a fresh copy of `image`.
///
/// `scores` must parallel `holes`; holes draw in detection order.
pub fn annotate(
    image: &RgbImage,
    holes: &[DetectedHole],
    scores: &[u32],
    center: &TargetCenter,
    scoring: &ScoringParams,
    params: &AnnotateParams,
) -> RgbImage {
    debug_assert_eq!(holes.len(), scores.len());
    let mut out = image.clone();
    let (w, h) = out.dimensions();
    let diameter = estimated_target_diameter(w, h, scoring.fill_ratio);
    let cx = center.center.x;
    let cy = center.center.y;

    // 1. Ring guides with their point values, innermost first.
    for (i, zone) in scoring.table.zones.iter().enumerate() {
        let color = ZONE_COLORS[i % ZONE_COLORS.len()];
        let radius = diameter * zone.outer_ratio;
        draw_hollow_circle_mut(
            &mut out,
            (cx.round() as i32, cy.round() as i32),
            (radius.round() as i32).max(1),
            color,
        );
        let (_, label_h) = label_extent(zone.points, params.label_scale);
        draw_score_label(
            &mut out,
            zone.points,
            (cx + radius + 4.0).round() as i32,
            (cy - label_h as f32 / 2.0).round() as i32,
            params.label_scale,
            color,
        );
    }

    // 2. Center marker: filled disc plus open ring.
    draw_filled_circle_mut(
        &mut out,
        (cx.round() as i32, cy.round() as i32),
        4,
        CENTER_COLOR,
    );
    draw_hollow_circle_mut(
        &mut out,
        (cx.round() as i32, cy.round() as i32),
        12,
        CENTER_COLOR,
    );

    // 3. Per-hole marks, detection order.
    for (hole, &score) in holes.iter().zip(scores) {
        draw_hole_marks(&mut out, hole, score, params);
    }
    out
}

fn draw_hole_marks(out: &mut RgbImage, hole: &DetectedHole, score: u32, params: &AnnotateParams) {
    let hx = hole.center.x;
    let hy = hole.center.y;
    let center = (hx.round() as i32, hy.round() as i32);

    // Raw detection outline.
    draw_hollow_circle_mut(out, center, (hole.radius.round() as i32).max(1), HOLE_COLOR);
    // Known projectile diameter for visual sanity checking.
    draw_hollow_circle_mut(
        out,
        center,
        (params.caliber_radius.round() as i32).max(1),
        CALIBER_COLOR,
    );

    let arm = params.crosshair_half_len;
    draw_line_segment_mut(out, (hx - arm, hy), (hx + arm, hy), CROSSHAIR_COLOR);
    draw_line_segment_mut(out, (hx, hy - arm), (hx, hy + arm), CROSSHAIR_COLOR);

    let (_, label_h) = label_extent(score, params.label_scale);
    draw_score_label(
        out,
        score,
        (hx + params.caliber_radius + 4.0).round() as i32,
        (hy - label_h as f32 / 2.0).round() as i32,
        params.label_scale,
        LABEL_FG,
    );
}

// 5x7 digit glyphs, one row per byte, bit 4 = leftmost column.
const DIGIT_ROWS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

fn decimal_digits(value: u32) -> Vec<u8> {
    let mut digits = Vec::new();
    let mut v = value;
    loop {
        digits.push((v % 10) as u8);
        v /= 10;
        if v == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Pixel extent of a rendered score label, background padding included.
pub fn label_extent(value: u32, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    let n = decimal_digits(value).len() as u32;
    let pad = scale;
    let width = n * GLYPH_W * scale + (n - 1) * scale + 2 * pad;
    let height = GLYPH_H * scale + 2 * pad;
    (width, height)
}

/// Draw a non-negative integer at `(x, y)` (top-left corner) over an
/// opaque background rectangle sized to the text extent.
fn draw_score_label(out: &mut RgbImage, value: u32, x: i32, y: i32, scale: u32, fg: Rgb<u8>) {
    let scale = scale.max(1);
    let (width, height) = label_extent(value, scale);
    draw_filled_rect_mut(out, Rect::at(x, y).of_size(width, height), LABEL_BG);

    let pad = scale as i32;
    let mut pen_x = x + pad;
    let pen_y = y + pad;
    for digit in decimal_digits(value) {
        let rows = &DIGIT_ROWS[digit as usize];
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                    draw_filled_rect_mut(
                        out,
                        Rect::at(
                            pen_x + (col * scale) as i32,
                            pen_y + (row as u32 * scale) as i32,
                        )
                        .of_size(scale, scale),
                        fg,
                    );
                }
            }
        }
        pen_x += ((GLYPH_W + 1) * scale) as i32;
    }
}
