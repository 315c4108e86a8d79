#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod boundaries;
pub mod error;
pub mod geometry;
pub mod image;

// Numeric helpers shared by the filters; public for reuse, unstable surface.
pub mod vecmath;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the boundary pipeline + results.
pub use crate::boundaries::{
    geometry_discontinuities, geometry_discontinuities_traced, BoundaryParams, BoundaryTrace,
};
pub use crate::error::GeometryError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::boundaries::{geometry_discontinuities, BoundaryParams};
    pub use crate::geometry::{Coordinates, DistanceUnit};
    pub use crate::image::{ImageBool, ImageF32, ImageVec3, ImageView};
}
