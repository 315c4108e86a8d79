use geometry_boundaries::image::{ImageF32, ImageVec3};
use nalgebra::Vector3;

/// Flat plane z = 0 on a unit (x, y) raster, viewed down the z axis:
/// upward normals, constant viewpoint distance.
pub fn flat_scene(width: usize, height: usize) -> (ImageVec3, ImageF32, ImageVec3) {
    assert!(width > 0 && height > 0, "scene dimensions must be positive");

    let mut xyz = ImageVec3::new(width, height);
    for y in 0..height {
        for x in 0..width {
            xyz.set(x, y, Vector3::new(x as f32, y as f32, 0.0));
        }
    }
    let dist = ImageF32::filled(width, height, 100.0);
    let nor = ImageVec3::filled(width, height, Vector3::new(0.0, 0.0, 1.0));
    (xyz, dist, nor)
}

/// Flat scene with every column left of `step_x` pulled `depth` centimeters
/// toward the viewpoint: a foreground surface occluding the background along
/// a vertical silhouette.
pub fn occlusion_step_scene(
    width: usize,
    height: usize,
    step_x: usize,
    depth: f32,
) -> (ImageVec3, ImageF32, ImageVec3) {
    let (mut xyz, mut dist, nor) = flat_scene(width, height);
    for y in 0..height {
        for x in 0..step_x {
            let p = xyz.get(x, y);
            xyz.set(x, y, Vector3::new(p.x, p.y, -depth));
            dist.set(x, y, 100.0 - depth);
        }
    }
    (xyz, dist, nor)
}

/// Flat scene whose normals swing by 90 degrees at `seam_y`: a horizontal
/// crease with no positional discontinuity.
pub fn crease_scene(
    width: usize,
    height: usize,
    seam_y: usize,
) -> (ImageVec3, ImageF32, ImageVec3) {
    let (xyz, dist, mut nor) = flat_scene(width, height);
    for y in seam_y..height {
        for x in 0..width {
            nor.set(x, y, Vector3::new(0.0, 1.0, 0.0));
        }
    }
    (xyz, dist, nor)
}
