//! Position-deviation filter: per-pixel occlusion statistic.
//!
//! For each interior pixel the filter sums, over the whole patch, the signed
//! deviation of every neighboring position from the tangent plane at the
//! patch center (the plane through the center position, perpendicular to the
//! center normal). A negative sum means the patch on balance lies behind that
//! plane as seen from the viewpoint side, which is what the silhouette of an
//! occluding surface against a receding background looks like; the negated,
//! normalized sum is stored. A non-negative sum stores 0.
//!
//! The normalization divisor is `half_patch_size * patch_size`, assuming a
//! flat occluding surface covering roughly half the patch. The border of
//! width `half_patch_size` keeps the 0.0 initialization value.

use crate::error::GeometryError;
use crate::image::{ImageF32, ImageVec3, ImageView};
use crate::vecmath::point_plane_deviation;
use rayon::prelude::*;

use super::check_patch_size;

/// Compute the position-deviation field of `position` under `normal`.
///
/// `patch_size` must be odd, at least 3 and no larger than the smaller grid
/// dimension; `position` and `normal` must have identical dimensions.
pub fn compute_position_deviation(
    patch_size: usize,
    position: &ImageVec3,
    normal: &ImageVec3,
) -> Result<ImageF32, GeometryError> {
    if !position.same_size(normal) {
        return Err(GeometryError::ShapeMismatch {
            context: "compute_position_deviation",
            expected: position.dims(),
            actual: normal.dims(),
        });
    }
    check_patch_size("position patch size", patch_size, position.dims())?;

    let (w, h) = position.dims();
    let half = (patch_size - 1) / 2;
    let norm = (half * patch_size) as f64;

    let mut deviation = ImageF32::new(w, h);
    deviation
        .data
        .par_chunks_mut(w)
        .enumerate()
        .skip(half)
        .take(h - 2 * half)
        .for_each(|(y, out_row)| {
            for x in half..w - half {
                let center_position = position.get(x, y);
                let center_normal = normal.get(x, y);

                let mut total = 0.0f64;
                for i in -(half as isize)..=half as isize {
                    for j in -(half as isize)..=half as isize {
                        let neighbor = position.get(
                            (x as isize + j) as usize,
                            (y as isize + i) as usize,
                        );
                        total +=
                            point_plane_deviation(&neighbor, &center_normal, &center_position);
                    }
                }

                // Only patches that sit behind the center's tangent plane
                // count as potential occlusion boundaries.
                if total < 0.0 {
                    out_row[x] = (-total / norm) as f32;
                }
            }
        });

    Ok(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    /// Flat plane z = 0 with upward normals; positions on an (x, y) raster.
    fn flat_scene(w: usize, h: usize) -> (ImageVec3, ImageVec3) {
        let mut position = ImageVec3::new(w, h);
        for y in 0..h {
            for x in 0..w {
                position.set(x, y, Vector3::new(x as f32, y as f32, 0.0));
            }
        }
        let normal = ImageVec3::filled(w, h, Vector3::new(0.0, 0.0, 1.0));
        (position, normal)
    }

    #[test]
    fn flat_surface_has_no_signal() {
        let (position, normal) = flat_scene(7, 7);
        let deviation = compute_position_deviation(3, &position, &normal).unwrap();
        assert!(deviation.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn slanted_plane_has_no_signal() {
        // All points on the plane x + y + z = 0, normals along (1,1,1)/√3.
        let w = 6;
        let h = 6;
        let mut position = ImageVec3::new(w, h);
        for y in 0..h {
            for x in 0..w {
                position.set(x, y, Vector3::new(x as f32, y as f32, -(x as f32) - y as f32));
            }
        }
        let n = Vector3::new(1.0f32, 1.0, 1.0).normalize();
        let normal = ImageVec3::filled(w, h, n);
        let deviation = compute_position_deviation(3, &position, &normal).unwrap();
        assert!(deviation.data.iter().all(|&v| v.abs() < 1e-4));
    }

    #[test]
    fn protruding_center_marks_its_neighbors() {
        // 5×5 flat plane with the center pixel pulled 10 cm toward the
        // viewpoint (negative z with normals pointing at +z).
        let (mut position, normal) = flat_scene(5, 5);
        position.set(2, 2, Vector3::new(2.0, 2.0, -10.0));
        let deviation = compute_position_deviation(3, &position, &normal).unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let v = deviation.get(x, y);
                let is_border = x == 0 || y == 0 || x == 4 || y == 4;
                let adjacent_to_center = !is_border
                    && (x as isize - 2).abs() <= 1
                    && (y as isize - 2).abs() <= 1
                    && (x, y) != (2, 2);
                if adjacent_to_center {
                    // One patch point 10 behind the tangent plane, divided
                    // by half_patch_size * patch_size = 3.
                    assert!((v - 10.0 / 3.0).abs() < 1e-5, "({x},{y}) = {v}");
                } else {
                    assert_eq!(v, 0.0, "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn receding_patch_is_one_sided() {
        // The center itself sits in front of its whole patch: the patch sum
        // is positive, so the center pixel reports no deviation.
        let (mut position, normal) = flat_scene(5, 5);
        position.set(2, 2, Vector3::new(2.0, 2.0, -10.0));
        let deviation = compute_position_deviation(3, &position, &normal).unwrap();
        assert_eq!(deviation.get(2, 2), 0.0);
    }

    #[test]
    fn border_stays_zero_for_larger_patches() {
        let (mut position, normal) = flat_scene(9, 9);
        position.set(4, 4, Vector3::new(4.0, 4.0, -25.0));
        let deviation = compute_position_deviation(5, &position, &normal).unwrap();
        for y in 0..9 {
            for x in 0..9 {
                if x < 2 || y < 2 || x > 6 || y > 6 {
                    assert_eq!(deviation.get(x, y), 0.0, "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn rejects_bad_patch_sizes() {
        let (position, normal) = flat_scene(5, 5);
        for patch_size in [1, 2, 4, 7] {
            let err = compute_position_deviation(patch_size, &position, &normal).unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter(_)), "{patch_size}");
        }
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let (position, _) = flat_scene(5, 5);
        let (_, normal) = flat_scene(5, 4);
        let err = compute_position_deviation(3, &position, &normal).unwrap_err();
        assert!(matches!(err, GeometryError::ShapeMismatch { .. }));
    }
}
