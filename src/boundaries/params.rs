//! Tunables for geometry-boundary detection.
//!
//! Defaults mirror the command-line tool's hardwired values: 3×3 patches,
//! 2 cm position threshold, 20° orientation threshold. The thresholds assume
//! position and distance data have already been standardized to centimeters.

use serde::{Deserialize, Serialize};

/// Parameters for the two discontinuity tests and their maxima reduction.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct BoundaryParams {
    /// Side length of the square window for the position test. Odd, ≥ 3.
    pub position_patch_size: usize,
    /// Side length of the square window for the orientation test. Odd, ≥ 3.
    pub orientation_patch_size: usize,
    /// Minimum position deviation (centimeters) kept by the maxima step.
    pub position_threshold: f32,
    /// Minimum orientation deviation (degrees) kept by the maxima step.
    pub orientation_threshold: f32,
    /// Apply a 3×3 blur to the orientation deviations before the maxima step.
    pub smooth_orientation: bool,
}

impl Default for BoundaryParams {
    fn default() -> Self {
        Self {
            position_patch_size: 3,
            orientation_patch_size: 3,
            position_threshold: 2.0,
            orientation_threshold: 20.0,
            smooth_orientation: false,
        }
    }
}
