//! Grayscale conversion and noise smoothing ahead of circle detection.
//!
//! The blur is deliberately aggressive: paper texture and print grain
//! throw off the gradient voter far more than a slightly softened hole
//! rim does, and marks in the detector's 5-40 px radius band survive a
//! 9x9 Gaussian comfortably.

use image::{GrayImage, RgbImage};
use imageproc::filter::separable_filter;
use serde::{Deserialize, Serialize};

/// Smoothing parameters, matching an explicit-extent Gaussian blur.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Kernel extent per axis; forced odd, so 8 behaves as 9.
    pub kernel_size: u32,
    /// Gaussian sigma along x.
    pub sigma_x: f32,
    /// Gaussian sigma along y.
    pub sigma_y: f32,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            kernel_size: 9,
            sigma_x: 2.0,
            sigma_y: 2.0,
        }
    }
}

/// Collapse the photo to luminance.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Smooth a grayscale image with a separable Gaussian of the configured
/// extent and sigmas.
pub fn blur(image: &GrayImage, params: &BlurParams) -> GrayImage {
    let h_kernel = gaussian_kernel(params.kernel_size, params.sigma_x);
    let v_kernel = gaussian_kernel(params.kernel_size, params.sigma_y);
    separable_filter(image, &h_kernel, &v_kernel)
}

/// Normalized 1-D Gaussian taps for the given extent.
fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let size = size.max(1) | 1;
    let half = (size / 2) as i32;
    let sigma = sigma.max(1e-3);
    let denom = 2.0 * sigma * sigma;

    let mut taps: Vec<f32> = (-half..=half)
        .map(|i| (-(i * i) as f32 / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}
