use geometry_boundaries::boundaries::{geometry_discontinuities, BoundaryParams};
use geometry_boundaries::error::GeometryError;
use geometry_boundaries::geometry::{
    read_geom1d_from_path, read_geom3d_from_path, standard_units_1d, standard_units_3d,
    Coordinates,
};
use geometry_boundaries::image::io::save_mask_png;
use std::env;
use std::path::Path;
use std::process;

const USAGE: &str = "geometry-boundaries coordinates xyz.txt dist.txt nor.txt gbound.png";
const ARGS_NEEDED: usize = 5;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != ARGS_NEEDED {
        eprintln!("{USAGE}");
        process::exit(1);
    }

    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), GeometryError> {
    let coordinates = Coordinates::from_path(Path::new(&args[0]))?;
    let mut xyz = read_geom3d_from_path(Path::new(&args[1]))?;
    let mut dist = read_geom1d_from_path(Path::new(&args[2]))?;
    let nor = read_geom3d_from_path(Path::new(&args[3]))?;

    // Standardize position and distance data to centimeters; normals are
    // unitless and stay as read.
    standard_units_1d(&mut dist, &coordinates);
    standard_units_3d(&mut xyz, &coordinates);

    let params = BoundaryParams::default();
    let boundaries = geometry_discontinuities(&coordinates, &xyz, &dist, &nor, &params)?;

    save_mask_png(&boundaries, Path::new(&args[4]))
}
