//! Owned grid of 3-vectors in row-major layout (stride == width).
//!
//! Holds per-pixel positions (model coordinates, length units) and unit
//! surface normals as read from Radiance ASCII geometry files.
use nalgebra::Vector3;

#[derive(Clone, Debug)]
pub struct ImageVec3 {
    /// Grid width in pixels
    pub w: usize,
    /// Grid height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<Vector3<f32>>,
}

impl ImageVec3 {
    /// Construct a grid of size `w × h` filled with zero vectors.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![Vector3::zeros(); w * h],
        }
    }

    /// Construct a grid filled with `value`.
    pub fn filled(w: usize, h: usize, value: Vector3<f32>) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the vector at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Vector3<f32> {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the vector at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: Vector3<f32>) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl crate::image::traits::ImageView for ImageVec3 {
    type Pixel = Vector3<f32>;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[Vector3<f32>] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Vector3<f32>]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageVec3 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Vector3<f32>] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
