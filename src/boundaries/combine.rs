//! Elementwise union of boundary masks.

use crate::error::GeometryError;
use crate::image::{ImageBool, ImageView};

/// Combine two masks: TRUE where either input is TRUE.
///
/// The masks must have identical dimensions. Pure, no side effects.
pub fn mask_or(a: &ImageBool, b: &ImageBool) -> Result<ImageBool, GeometryError> {
    if !a.same_size(b) {
        return Err(GeometryError::ShapeMismatch {
            context: "mask_or",
            expected: a.dims(),
            actual: b.dims(),
        });
    }

    let mut out = ImageBool::new(a.w, a.h);
    for (dst, (&va, &vb)) in out.data.iter_mut().zip(a.data.iter().zip(b.data.iter())) {
        *dst = va || vb;
    }
    Ok(out)
}
