//! Directional local maxima of a deviation field.
//!
//! Canny-style non-maximum suppression that thins a broad deviation response
//! into a one-pixel boundary line: a pixel survives when its value exceeds
//! the threshold and is strictly greater than both neighbors sampled along
//! the quantized gradient direction of the field.
//!
//! - Gradients are Sobel with border clamping.
//! - Direction quantization uses 4 bins (0°, 45°, 90°, 135°) selected with a
//!   22.5° tolerance, matching the comparison-neighbor scheme of a classic
//!   edge NMS.
//! - The two comparison neighbors sit `half_patch_size` pixels away; pixels
//!   within `half_patch_size` of an edge stay FALSE.
//! - A plateau (zero gradient) falls into the horizontal bin and is compared
//!   against its left/right neighbors, so constant regions never survive.
//! - Ties along the direction are broken asymmetrically (strict against the
//!   leading neighbor, non-strict against the trailing one): an ideal crease
//!   response, which is a two-pixel plateau across its direction, thins to a
//!   single line instead of vanishing.

use crate::error::GeometryError;
use crate::image::{ImageBool, ImageF32, ImageView, ImageViewMut};

use super::check_patch_size;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const TAN_22_5_DEG: f32 = 0.41421356237;

struct Gradients {
    gx: ImageF32,
    gy: ImageF32,
}

fn sobel_gradients(field: &ImageF32) -> Gradients {
    let (w, h) = field.dims();
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return Gradients { gx, gy };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [field.row(y_idx[0]), field.row(y_idx[1]), field.row(y_idx[2])];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                sum_x += row[x_idx[0]] * kx_row[0]
                    + row[x_idx[1]] * kx_row[1]
                    + row[x_idx[2]] * kx_row[2];
                sum_y += row[x_idx[0]] * ky_row[0]
                    + row[x_idx[1]] * ky_row[1]
                    + row[x_idx[2]] * ky_row[2];
            }

            gx.set(x, y, sum_x);
            gy.set(x, y, sum_y);
        }
    }

    Gradients { gx, gy }
}

/// Reduce a deviation field to a boolean mask of its directional local
/// maxima above `threshold`.
///
/// `patch_size` must be odd, at least 3 and no larger than the smaller grid
/// dimension; it sets the comparison distance and the FALSE border width.
/// Deterministic given identical inputs.
pub fn find_directional_maxima(
    patch_size: usize,
    threshold: f32,
    field: &ImageF32,
) -> Result<ImageBool, GeometryError> {
    check_patch_size("maxima patch size", patch_size, field.dims())?;

    let (w, h) = field.dims();
    let half = (patch_size - 1) / 2;
    let grad = sobel_gradients(field);

    let mut mask = ImageBool::new(w, h);
    for y in half..h - half {
        let field_prev = field.row(y - half);
        let field_row = field.row(y);
        let field_next = field.row(y + half);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let out_row = mask.row_mut(y);

        for x in half..w - half {
            let v = field_row[x];
            if v <= threshold {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (field_row[x - half], field_row[x + half])
                } else if same_sign {
                    (field_prev[x + half], field_next[x - half])
                } else {
                    (field_prev[x - half], field_next[x + half])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (field_prev[x], field_next[x])
            } else if same_sign {
                (field_prev[x + half], field_next[x - half])
            } else {
                (field_prev[x - half], field_next[x + half])
            };

            if v > neighbor1 && v >= neighbor2 {
                out_row[x] = true;
            }
        }
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ridge_field(w: usize, h: usize, ridge_x: usize, value: f32) -> ImageF32 {
        let mut field = ImageF32::new(w, h);
        for y in 0..h {
            field.set(ridge_x, y, value);
        }
        field
    }

    #[test]
    fn vertical_ridge_survives_as_a_line() {
        let field = ridge_field(7, 7, 3, 50.0);
        let mask = find_directional_maxima(3, 2.0, &field).unwrap();
        for y in 1..6 {
            assert!(mask.get(3, y), "y={y}");
            assert!(!mask.get(2, y));
            assert!(!mask.get(4, y));
        }
        for x in 0..7 {
            assert!(!mask.get(x, 0));
            assert!(!mask.get(x, 6));
        }
    }

    #[test]
    fn plateau_never_survives() {
        let field = ImageF32::filled(7, 7, 50.0);
        let mask = find_directional_maxima(3, 2.0, &field).unwrap();
        assert_eq!(mask.count_true(), 0);
    }

    #[test]
    fn threshold_is_strict() {
        let field = ridge_field(7, 7, 3, 50.0);
        let at_threshold = find_directional_maxima(3, 50.0, &field).unwrap();
        assert_eq!(at_threshold.count_true(), 0);

        let below_threshold = find_directional_maxima(3, 49.9, &field).unwrap();
        assert!(below_threshold.count_true() > 0);
    }

    #[test]
    fn horizontal_ridge_is_thinned_vertically() {
        let mut field = ImageF32::new(7, 7);
        for x in 0..7 {
            field.set(x, 2, 10.0);
            field.set(x, 3, 30.0);
        }
        let mask = find_directional_maxima(3, 2.0, &field).unwrap();
        for x in 1..6 {
            assert!(mask.get(x, 3), "x={x}");
            assert!(!mask.get(x, 2), "x={x}");
            assert!(!mask.get(x, 4), "x={x}");
        }
    }

    #[test]
    fn two_pixel_plateau_thins_to_one_line() {
        // An ideal crease response: two equal columns across the direction.
        let mut field = ImageF32::new(7, 7);
        for y in 0..7 {
            field.set(3, y, 40.0);
            field.set(4, y, 40.0);
        }
        let mask = find_directional_maxima(3, 2.0, &field).unwrap();
        for y in 1..6 {
            assert_eq!(
                mask.get(3, y) as u8 + mask.get(4, y) as u8,
                1,
                "exactly one of the plateau columns survives at y={y}"
            );
        }
    }

    #[test]
    fn rejects_bad_patch_sizes() {
        let field = ImageF32::new(5, 5);
        for patch_size in [1, 2, 4, 7] {
            let err = find_directional_maxima(patch_size, 1.0, &field).unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter(_)), "{patch_size}");
        }
    }
}
