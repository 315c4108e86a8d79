//! Coordinates files: distance units, conversion factors and the camera view.
//!
//! A coordinates file is a two-line text file. The first line names the unit
//! of length used by the position and distance geometry files
//! (`distance-units=<centimeters|meters|inches|feet>`). The second line, when
//! present, repeats the renderer's VIEW record (`VIEW=-vtv -vp x y z ...`).
//! The view is carried for downstream tooling; the boundary filters never
//! consult it.

use crate::error::GeometryError;
use crate::image::{ImageF32, ImageVec3};
use nalgebra::Vector3;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const CENTIMETERS_TO_CENTIMETERS: f32 = 1.0;
const METERS_TO_CENTIMETERS: f32 = 100.0;
const INCHES_TO_CENTIMETERS: f32 = 2.54;
const FEET_TO_CENTIMETERS: f32 = 30.48;

/// Unit of length used by position and distance geometry files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Centimeters,
    Meters,
    Inches,
    Feet,
}

impl DistanceUnit {
    /// Multiplicative conversion factor from this unit to centimeters.
    pub fn to_centimeters(self) -> f32 {
        match self {
            DistanceUnit::Centimeters => CENTIMETERS_TO_CENTIMETERS,
            DistanceUnit::Meters => METERS_TO_CENTIMETERS,
            DistanceUnit::Inches => INCHES_TO_CENTIMETERS,
            DistanceUnit::Feet => FEET_TO_CENTIMETERS,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "centimeters" => Some(DistanceUnit::Centimeters),
            "meters" => Some(DistanceUnit::Meters),
            "inches" => Some(DistanceUnit::Inches),
            "feet" => Some(DistanceUnit::Feet),
            _ => None,
        }
    }
}

/// Camera view record as written by the renderer.
///
/// Only the commonly produced options are decoded; unrecognized options are
/// skipped. All fields are optional since renderers omit what they default.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    /// View type letter from `-vt?` (`v` perspective, `l` parallel, ...).
    pub view_type: Option<char>,
    /// Viewpoint from `-vp x y z`.
    pub origin: Option<Vector3<f32>>,
    /// View direction from `-vd x y z`.
    pub direction: Option<Vector3<f32>>,
    /// Up vector from `-vu x y z`.
    pub up: Option<Vector3<f32>>,
    /// Horizontal field of view in degrees from `-vh h`.
    pub horiz: Option<f32>,
    /// Vertical field of view in degrees from `-vv v`.
    pub vert: Option<f32>,
}

impl ViewRecord {
    fn parse(record: &str, path: &Path) -> Result<Self, GeometryError> {
        let mut view = ViewRecord::default();
        let mut tokens = record.split_whitespace();
        while let Some(token) = tokens.next() {
            match token {
                "-vp" => view.origin = Some(parse_vec3(&mut tokens, token, path)?),
                "-vd" => view.direction = Some(parse_vec3(&mut tokens, token, path)?),
                "-vu" => view.up = Some(parse_vec3(&mut tokens, token, path)?),
                "-vh" => view.horiz = Some(parse_scalar(&mut tokens, token, path)?),
                "-vv" => view.vert = Some(parse_scalar(&mut tokens, token, path)?),
                t if t.len() == 4 && t.starts_with("-vt") => {
                    view.view_type = t.chars().nth(3);
                }
                _ => {}
            }
        }
        Ok(view)
    }
}

fn parse_scalar<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    option: &str,
    path: &Path,
) -> Result<f32, GeometryError> {
    tokens
        .next()
        .and_then(|t| t.parse::<f32>().ok())
        .ok_or_else(|| GeometryError::format(path, format!("invalid VIEW option {option}")))
}

fn parse_vec3<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    option: &str,
    path: &Path,
) -> Result<Vector3<f32>, GeometryError> {
    let x = parse_scalar(tokens, option, path)?;
    let y = parse_scalar(tokens, option, path)?;
    let z = parse_scalar(tokens, option, path)?;
    Ok(Vector3::new(x, y, z))
}

/// Unit descriptor plus camera view for one set of geometry files.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub units: DistanceUnit,
    /// Factor converting file values to centimeters. Positive, fixed at load.
    pub convert_to_centimeters: f32,
    pub view: Option<ViewRecord>,
}

impl Coordinates {
    /// Build a descriptor for already-standardized data (no view record).
    pub fn new(units: DistanceUnit) -> Self {
        Self {
            units,
            convert_to_centimeters: units.to_centimeters(),
            view: None,
        }
    }

    /// Read a coordinates file from disk.
    pub fn from_path(path: &Path) -> Result<Self, GeometryError> {
        let file = File::open(path).map_err(|e| GeometryError::io(path, e))?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Read a coordinates file from any buffered reader. `path` is used for
    /// error reporting only.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, GeometryError> {
        let mut lines = reader.lines();

        let units_line = lines
            .next()
            .ok_or_else(|| GeometryError::format(path, "invalid coordinates file"))?
            .map_err(|e| GeometryError::io(path, e))?;
        let units_token = units_line
            .trim_end()
            .strip_prefix("distance-units=")
            .ok_or_else(|| GeometryError::format(path, "invalid coordinates file"))?;
        let units = DistanceUnit::parse(units_token)
            .ok_or_else(|| GeometryError::format(path, "invalid UNITS value"))?;

        let mut view = None;
        if let Some(line) = lines.next() {
            let line = line.map_err(|e| GeometryError::io(path, e))?;
            let line = line.trim_end();
            if !line.is_empty() {
                let record = line
                    .strip_prefix("VIEW=")
                    .ok_or_else(|| GeometryError::format(path, "invalid VIEW record"))?;
                view = Some(ViewRecord::parse(record, path)?);
            }
        }

        Ok(Self {
            units,
            convert_to_centimeters: units.to_centimeters(),
            view,
        })
    }
}

/// Convert a scalar field in place to centimeters.
pub fn standard_units_1d(field: &mut ImageF32, coordinates: &Coordinates) {
    let conversion = coordinates.convert_to_centimeters;
    for v in &mut field.data {
        *v *= conversion;
    }
}

/// Convert a 3-vector field in place to centimeters. Never apply this to
/// normals, which are unitless.
pub fn standard_units_3d(field: &mut ImageVec3, coordinates: &Coordinates) {
    let conversion = coordinates.convert_to_centimeters;
    for v in &mut field.data {
        *v *= conversion;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn coords_path() -> std::path::PathBuf {
        std::path::PathBuf::from("coordinates")
    }

    #[test]
    fn parses_units_and_view() {
        let text = "distance-units=feet\nVIEW=-vtv -vp 1 2 3 -vd 0 0 -1 -vu 0 1 0 -vh 45 -vv 35\n";
        let coords = Coordinates::from_reader(Cursor::new(text), &coords_path()).unwrap();
        assert_eq!(coords.units, DistanceUnit::Feet);
        assert_eq!(coords.convert_to_centimeters, 30.48);
        let view = coords.view.expect("view record");
        assert_eq!(view.view_type, Some('v'));
        assert_eq!(view.origin, Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(view.direction, Some(Vector3::new(0.0, 0.0, -1.0)));
        assert_eq!(view.horiz, Some(45.0));
        assert_eq!(view.vert, Some(35.0));
    }

    #[test]
    fn view_line_is_optional() {
        let coords =
            Coordinates::from_reader(Cursor::new("distance-units=meters\n"), &coords_path())
                .unwrap();
        assert_eq!(coords.units, DistanceUnit::Meters);
        assert!(coords.view.is_none());
    }

    #[test]
    fn rejects_unknown_units() {
        let err = Coordinates::from_reader(Cursor::new("distance-units=cubits\n"), &coords_path())
            .unwrap_err();
        assert!(matches!(err, GeometryError::Format { .. }));
    }

    #[test]
    fn rejects_missing_units_prefix() {
        let err =
            Coordinates::from_reader(Cursor::new("units=meters\n"), &coords_path()).unwrap_err();
        assert!(matches!(err, GeometryError::Format { .. }));
    }

    #[test]
    fn unknown_view_options_are_skipped() {
        let text = "distance-units=centimeters\nVIEW=-vtv -x_foo 7 -vh 60\n";
        let coords = Coordinates::from_reader(Cursor::new(text), &coords_path()).unwrap();
        let view = coords.view.expect("view record");
        assert_eq!(view.horiz, Some(60.0));
        assert!(view.origin.is_none());
    }

    #[test]
    fn standardizes_scalars_and_vectors() {
        let coords = Coordinates::new(DistanceUnit::Feet);

        let mut dist = ImageF32::filled(2, 2, 1.0);
        standard_units_1d(&mut dist, &coords);
        assert_eq!(dist.get(0, 0), 30.48);

        let mut xyz = ImageVec3::filled(1, 1, Vector3::new(1.0, 1.0, 1.0));
        standard_units_3d(&mut xyz, &coords);
        assert_eq!(xyz.get(0, 0), Vector3::new(30.48, 30.48, 30.48));
    }
}
