pub mod synthetic_geometry;
