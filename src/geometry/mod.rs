//! Geometry-file collaborators: Radiance ASCII readers, coordinates files
//! and unit standardization.
//!
//! The boundary filters consume three same-sized grids (position, distance,
//! surface normal). This module produces them from the renderer's output
//! files and converts position and distance data to the common centimeter
//! unit before any filtering.

pub mod coordinates;
pub mod radiance;

pub use coordinates::{
    standard_units_1d, standard_units_3d, Coordinates, DistanceUnit, ViewRecord,
};
pub use radiance::{read_geom1d, read_geom1d_from_path, read_geom3d, read_geom3d_from_path};
