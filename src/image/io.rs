//! I/O helpers for masks, deviation fields and JSON summaries.
//!
//! - `save_mask_png`: write an `ImageBool` as 8-bit grayscale, TRUE → 255.
//! - `save_deviation_png`: write an `ImageF32` rescaled to its maximum, for
//!   diagnostic inspection of intermediate deviation fields.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageBool, ImageF32, ImageView};
use crate::error::GeometryError;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Save a boolean mask to an 8-bit grayscale PNG (TRUE → 255, FALSE → 0).
pub fn save_mask_png(mask: &ImageBool, path: &Path) -> Result<(), GeometryError> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([if px { 255 } else { 0 }]));
        }
    }
    out.save(path)
        .map_err(|e| GeometryError::format(path, format!("failed to save PNG: {e}")))
}

/// Save a deviation field to a grayscale PNG, rescaled so the field maximum
/// maps to 255. An all-zero field saves as all black.
pub fn save_deviation_png(field: &ImageF32, path: &Path) -> Result<(), GeometryError> {
    ensure_parent_dir(path)?;
    let max = field.data.iter().cloned().fold(0.0f32, f32::max);
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    let mut out = GrayImage::new(field.w as u32, field.h as u32);
    for (y, row) in field.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px * scale).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| GeometryError::format(path, format!("failed to save PNG: {e}")))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), GeometryError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| GeometryError::format(path, format!("failed to serialize JSON: {e}")))?;
    fs::write(path, json).map_err(|e| GeometryError::io(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<(), GeometryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GeometryError::io(parent, e))?;
        }
    }
    Ok(())
}
