//! Gradient-vote circular Hough transform for bullet-hole candidates.
//!
//! The detector implements the classic two-stage gradient scheme: edge
//! pixels vote along their gradient direction into a (possibly
//! downscaled) center accumulator, accepted peaks become candidate
//! centers, and a per-center radius histogram over the supporting edge
//! pixels picks each candidate's radius.
//!
//! The contract is deliberately narrow: `find_circles(image, params)`
//! returns plain `DetectedHole` triples, so any circular-feature
//! detector honoring the same radius range and min-distance suppression
//! is substitutable for this crate.

mod detect;
mod params;

pub use detect::find_circles;
pub use params::HoughParams;
