//! Orientation-deviation filter: per-pixel crease statistic.
//!
//! For each interior pixel the filter averages the angular distance between
//! surface normals at equal but opposite offsets from the patch center: every
//! row offset in the upper half of the patch is paired with its mirror image,
//! plus the mirrored column pairs of the center row. One consequence of the
//! pairing is that a detected orientation edge lies between two adjacent
//! pixels rather than on one of them, unlike the position test.
//!
//! Angles are in degrees; the sum is normalized by
//! `(patch_size + 1) * half_patch_size`, the number of pairs. The border of
//! width `half_patch_size` keeps the 0.0 initialization value.

use crate::error::GeometryError;
use crate::image::{ImageF32, ImageVec3, ImageView, ImageViewMut};
use crate::vecmath::normal_angle_degrees;
use rayon::prelude::*;

use super::check_patch_size;

/// Compute the orientation-deviation field of `normal`.
///
/// `patch_size` must be odd, at least 3 and no larger than the smaller grid
/// dimension.
pub fn compute_orientation_deviation(
    patch_size: usize,
    normal: &ImageVec3,
) -> Result<ImageF32, GeometryError> {
    check_patch_size("orientation patch size", patch_size, normal.dims())?;

    let (w, h) = normal.dims();
    let half = (patch_size - 1) / 2;
    let norm = ((patch_size + 1) * half) as f64;

    let mut deviation = ImageF32::new(w, h);
    deviation
        .data
        .par_chunks_mut(w)
        .enumerate()
        .skip(half)
        .take(h - 2 * half)
        .for_each(|(y, out_row)| {
            for x in half..w - half {
                let mut total = 0.0f64;

                for i in -(half as isize)..0 {
                    for j in -(half as isize)..=half as isize {
                        let a = normal.get(
                            (x as isize + j) as usize,
                            (y as isize + i) as usize,
                        );
                        let b = normal.get(
                            (x as isize - j) as usize,
                            (y as isize - i) as usize,
                        );
                        total += normal_angle_degrees(&a, &b);
                    }
                }

                // Mirrored column pairs of the center row.
                for j in -(half as isize)..0 {
                    let a = normal.get((x as isize + j) as usize, y);
                    let b = normal.get((x as isize - j) as usize, y);
                    total += normal_angle_degrees(&a, &b);
                }

                out_row[x] = (total / norm) as f32;
            }
        });

    Ok(deviation)
}

const BLUR_TAPS: [f32; 3] = [0.25, 0.5, 0.25];

/// 3×3 blur of a deviation field (separable binomial kernel, clamped
/// borders). Applied before the maxima step when smoothing is requested.
pub fn smooth_deviation_3x3(field: &ImageF32) -> ImageF32 {
    let (w, h) = field.dims();
    if w == 0 || h == 0 {
        return field.clone();
    }

    let mut horizontal = ImageF32::new(w, h);
    for y in 0..h {
        let src = field.row(y);
        let dst = horizontal.row_mut(y);
        for x in 0..w {
            let left = src[x.saturating_sub(1)];
            let right = src[(x + 1).min(w - 1)];
            dst[x] = left * BLUR_TAPS[0] + src[x] * BLUR_TAPS[1] + right * BLUR_TAPS[2];
        }
    }

    let mut smoothed = ImageF32::new(w, h);
    for y in 0..h {
        let above = horizontal.row(y.saturating_sub(1));
        let center = horizontal.row(y);
        let below = horizontal.row((y + 1).min(h - 1));
        let dst = smoothed.row_mut(y);
        for x in 0..w {
            dst[x] = above[x] * BLUR_TAPS[0] + center[x] * BLUR_TAPS[1] + below[x] * BLUR_TAPS[2];
        }
    }
    smoothed
}
