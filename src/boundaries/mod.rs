//! Geometry-boundary detection: occlusions and creases.
//!
//! Overview
//! - Runs two independent per-pixel tests over the standardized geometry
//!   grids: a position test that responds at the silhouette of occluding
//!   surfaces and an orientation test that responds at creases.
//! - Reduces each deviation field to a thin boolean boundary line with a
//!   directional local-maxima pass above a threshold.
//! - Unions the two masks into the final boundary mask.
//!
//! Modules
//! - [`params`] – tunables shared by the library and the CLI.
//! - [`position`] – occlusion statistic (tangent-plane deviation).
//! - [`orientation`] – crease statistic (mirrored-pair normal angles), plus
//!   the optional 3×3 smoothing pass.
//! - [`maxima`] – directional non-maximum suppression.
//! - [`combine`] – mask union.
//!
//! The orchestrator [`geometry_discontinuities`] is pure given its inputs:
//! every precondition violation comes back as a [`GeometryError`] and no
//! state persists across calls. [`geometry_discontinuities_traced`] exposes
//! the intermediate deviation fields and masks for diagnostics and tests.

pub mod combine;
pub mod maxima;
pub mod orientation;
pub mod params;
pub mod position;

pub use combine::mask_or;
pub use maxima::find_directional_maxima;
pub use orientation::{compute_orientation_deviation, smooth_deviation_3x3};
pub use params::BoundaryParams;
pub use position::compute_position_deviation;

use crate::error::GeometryError;
use crate::geometry::Coordinates;
use crate::image::{ImageBool, ImageF32, ImageVec3, ImageView};
use log::debug;
use std::time::Instant;

/// Patch size handed to the directional-maxima pass by the orchestrator.
pub const MAXIMA_PATCH_SIZE: usize = 3;

/// Intermediate products of one [`geometry_discontinuities_traced`] run.
#[derive(Clone, Debug)]
pub struct BoundaryTrace {
    /// Position-deviation field (centimeters), before thresholding.
    pub position_deviation: ImageF32,
    /// Directional maxima of the position deviations.
    pub position_boundaries: ImageBool,
    /// Orientation-deviation field (degrees), after optional smoothing.
    pub orientation_deviation: ImageF32,
    /// Directional maxima of the orientation deviations.
    pub orientation_boundaries: ImageBool,
    /// Wall-clock time of the position filter, milliseconds.
    pub position_ms: f64,
    /// Wall-clock time of the orientation filter, milliseconds.
    pub orientation_ms: f64,
    /// Wall-clock time of both maxima passes and the union, milliseconds.
    pub maxima_ms: f64,
}

pub(crate) fn check_patch_size(
    label: &str,
    patch_size: usize,
    dims: (usize, usize),
) -> Result<(), GeometryError> {
    if patch_size < 3 {
        return Err(GeometryError::InvalidParameter(format!(
            "{label} must be >= 3 (got {patch_size})"
        )));
    }
    if patch_size % 2 != 1 {
        return Err(GeometryError::InvalidParameter(format!(
            "{label} must be odd (got {patch_size})"
        )));
    }
    let min_image_size = dims.0.min(dims.1);
    if patch_size > min_image_size {
        return Err(GeometryError::InvalidParameter(format!(
            "{label} ({patch_size}) exceeds data size ({min_image_size})"
        )));
    }
    Ok(())
}

fn check_inputs(
    xyz: &ImageVec3,
    dist: &ImageF32,
    nor: &ImageVec3,
    params: &BoundaryParams,
) -> Result<(), GeometryError> {
    if !xyz.same_size(dist) {
        return Err(GeometryError::ShapeMismatch {
            context: "geometry_discontinuities",
            expected: xyz.dims(),
            actual: dist.dims(),
        });
    }
    if !xyz.same_size(nor) {
        return Err(GeometryError::ShapeMismatch {
            context: "geometry_discontinuities",
            expected: xyz.dims(),
            actual: nor.dims(),
        });
    }
    check_patch_size("position_patch_size", params.position_patch_size, xyz.dims())?;
    check_patch_size(
        "orientation_patch_size",
        params.orientation_patch_size,
        xyz.dims(),
    )?;
    Ok(())
}

/// Find geometric boundaries in a standardized position/distance/normal
/// triple and return the combined boundary mask.
///
/// `coordinates` and `dist` are accepted for API compatibility with the
/// geometry readers: the distance grid takes part in the shape validation
/// but neither is consumed by the current tests.
pub fn geometry_discontinuities(
    coordinates: &Coordinates,
    xyz: &ImageVec3,
    dist: &ImageF32,
    nor: &ImageVec3,
    params: &BoundaryParams,
) -> Result<ImageBool, GeometryError> {
    geometry_discontinuities_traced(coordinates, xyz, dist, nor, params)
        .map(|(mask, _trace)| mask)
}

/// As [`geometry_discontinuities`], additionally returning the intermediate
/// deviation fields and masks.
pub fn geometry_discontinuities_traced(
    _coordinates: &Coordinates,
    xyz: &ImageVec3,
    dist: &ImageF32,
    nor: &ImageVec3,
    params: &BoundaryParams,
) -> Result<(ImageBool, BoundaryTrace), GeometryError> {
    check_inputs(xyz, dist, nor, params)?;

    let position_start = Instant::now();
    let position_deviation =
        compute_position_deviation(params.position_patch_size, xyz, nor)?;
    let position_ms = position_start.elapsed().as_secs_f64() * 1000.0;

    let orientation_start = Instant::now();
    let mut orientation_deviation =
        compute_orientation_deviation(params.orientation_patch_size, nor)?;
    if params.smooth_orientation {
        orientation_deviation = smooth_deviation_3x3(&orientation_deviation);
    }
    let orientation_ms = orientation_start.elapsed().as_secs_f64() * 1000.0;

    let maxima_start = Instant::now();
    let position_boundaries = find_directional_maxima(
        MAXIMA_PATCH_SIZE,
        params.position_threshold,
        &position_deviation,
    )?;
    let orientation_boundaries = find_directional_maxima(
        MAXIMA_PATCH_SIZE,
        params.orientation_threshold,
        &orientation_deviation,
    )?;
    let combined = mask_or(&position_boundaries, &orientation_boundaries)?;
    let maxima_ms = maxima_start.elapsed().as_secs_f64() * 1000.0;

    debug!(
        "geometry_discontinuities: {}x{} position={} orientation={} combined={} ({position_ms:.3}/{orientation_ms:.3}/{maxima_ms:.3} ms)",
        xyz.w,
        xyz.h,
        position_boundaries.count_true(),
        orientation_boundaries.count_true(),
        combined.count_true(),
    );

    let trace = BoundaryTrace {
        position_deviation,
        position_boundaries,
        orientation_deviation,
        orientation_boundaries,
        position_ms,
        orientation_ms,
        maxima_ms,
    };
    Ok((combined, trace))
}
