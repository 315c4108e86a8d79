//! Readers for Radiance ASCII geometry files.
//!
//! Geometry files carry a conventional Radiance header with FORMAT `ascii`:
//! a `#?RADIANCE` magic line, free-form header lines up to a blank separator,
//! a `-Y <n_rows> +X <n_cols>` resolution line, then one value line per pixel
//! in row-major order. Scalar fields (viewpoint distances) hold one number
//! per line; vector fields (positions, surface normals) hold three.
//!
//! The header does not state the dimensionality; it is enforced from the per
//! line field count, so a 3-D file fed to the scalar reader fails on the
//! first data line.

use crate::error::GeometryError;
use crate::image::{ImageF32, ImageVec3};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const RADIANCE_MAGIC: &str = "#?RADIANCE";

/// Read a 3-D geometry file (positions or surface normals) from disk.
pub fn read_geom3d_from_path(path: &Path) -> Result<ImageVec3, GeometryError> {
    let file = File::open(path).map_err(|e| GeometryError::io(path, e))?;
    read_geom3d(BufReader::new(file), path)
}

/// Read a 1-D geometry file (viewpoint distances) from disk.
pub fn read_geom1d_from_path(path: &Path) -> Result<ImageF32, GeometryError> {
    let file = File::open(path).map_err(|e| GeometryError::io(path, e))?;
    read_geom1d(BufReader::new(file), path)
}

/// Read a 3-D geometry file from any buffered reader. `path` is used for
/// error reporting only.
pub fn read_geom3d<R: BufRead>(reader: R, path: &Path) -> Result<ImageVec3, GeometryError> {
    let mut lines = LineReader::new(reader, path);
    let (n_rows, n_cols) = read_header(&mut lines)?;

    let mut field = ImageVec3::new(n_cols, n_rows);
    for row in 0..n_rows {
        for col in 0..n_cols {
            let line = lines.expect_line()?;
            let values = parse_values(&line, 3, path, "not 3-D data")?;
            field.set(col, row, Vector3::new(values[0], values[1], values[2]));
        }
    }
    Ok(field)
}

/// Read a 1-D geometry file from any buffered reader. `path` is used for
/// error reporting only.
pub fn read_geom1d<R: BufRead>(reader: R, path: &Path) -> Result<ImageF32, GeometryError> {
    let mut lines = LineReader::new(reader, path);
    let (n_rows, n_cols) = read_header(&mut lines)?;

    let mut field = ImageF32::new(n_cols, n_rows);
    for row in 0..n_rows {
        for col in 0..n_cols {
            let line = lines.expect_line()?;
            let values = parse_values(&line, 1, path, "not 1-D data")?;
            field.set(col, row, values[0]);
        }
    }
    Ok(field)
}

struct LineReader<'p, R> {
    lines: std::io::Lines<R>,
    path: &'p Path,
}

impl<'p, R: BufRead> LineReader<'p, R> {
    fn new(reader: R, path: &'p Path) -> Self {
        Self {
            lines: reader.lines(),
            path,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, GeometryError> {
        match self.lines.next() {
            None => Ok(None),
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(GeometryError::io(self.path, e)),
        }
    }

    fn expect_line(&mut self) -> Result<String, GeometryError> {
        self.next_line()?.ok_or_else(|| {
            GeometryError::format(self.path, "unexpected end of file")
        })
    }
}

/// Consume the magic line, header lines and resolution line; return
/// (n_rows, n_cols).
fn read_header<R: BufRead>(lines: &mut LineReader<'_, R>) -> Result<(usize, usize), GeometryError> {
    let path = lines.path;

    let magic = lines.expect_line()?;
    if magic.trim_end() != RADIANCE_MAGIC {
        return Err(GeometryError::format(path, "not a RADIANCE file"));
    }

    // Header lines end with a blank separator line.
    loop {
        let line = lines
            .next_line()?
            .ok_or_else(|| GeometryError::format(path, "unexpected end of file in header"))?;
        if line.trim_end().is_empty() {
            break;
        }
    }

    let resolution = lines.expect_line()?;
    parse_resolution(&resolution)
        .ok_or_else(|| GeometryError::format(path, "invalid RADIANCE file"))
}

/// Parse `-Y <n_rows> +X <n_cols>`, the only orientation geometry files use.
fn parse_resolution(line: &str) -> Option<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "-Y" {
        return None;
    }
    let n_rows = tokens.next()?.parse::<usize>().ok()?;
    if tokens.next()? != "+X" {
        return None;
    }
    let n_cols = tokens.next()?.parse::<usize>().ok()?;
    if tokens.next().is_some() || n_rows == 0 || n_cols == 0 {
        return None;
    }
    Some((n_rows, n_cols))
}

fn parse_values(
    line: &str,
    expected: usize,
    path: &Path,
    mismatch_message: &str,
) -> Result<Vec<f32>, GeometryError> {
    let values: Result<Vec<f32>, _> = line
        .split_whitespace()
        .map(|t| t.parse::<f32>())
        .collect();
    match values {
        Ok(values) if values.len() == expected => Ok(values),
        _ => Err(GeometryError::format(path, mismatch_message)),
    }
}
