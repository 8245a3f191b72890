//! Core types and scoring geometry for paper-target shot analysis.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete circle detector or image type: it defines the
//! detected-hole and target-center types, the ring-zone tables, and the
//! zone scoring rules that the pipeline crates build on.

mod center;
mod hole;
mod logger;
mod scorer;
mod zones;

pub use center::{estimate_center, TargetCenter};
pub use hole::DetectedHole;
pub use scorer::{estimated_target_diameter, score_hole, score_holes, ScoringParams};
pub use zones::{ScoreZone, ZoneTable, ZoneTableError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
