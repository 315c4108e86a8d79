//! Diagnostic runner: executes the boundary pipeline from a JSON config and
//! writes the intermediate deviation fields and masks next to the combined
//! result, plus a JSON summary.

use geometry_boundaries::boundaries::{geometry_discontinuities_traced, BoundaryParams};
use geometry_boundaries::error::GeometryError;
use geometry_boundaries::geometry::{
    read_geom1d_from_path, read_geom3d_from_path, standard_units_1d, standard_units_3d,
    Coordinates, DistanceUnit,
};
use geometry_boundaries::image::io::{save_deviation_png, save_mask_png, write_json_file};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Deserialize)]
pub struct TraceToolConfig {
    pub coordinates: PathBuf,
    pub xyz: PathBuf,
    pub dist: PathBuf,
    pub nor: PathBuf,
    #[serde(default)]
    pub params: BoundaryParams,
    pub output: TraceOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TraceOutputConfig {
    pub position_deviation: PathBuf,
    pub position_boundaries: PathBuf,
    pub orientation_deviation: PathBuf,
    pub orientation_boundaries: PathBuf,
    pub combined: PathBuf,
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<TraceToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let result = trace(&config).map_err(|e| e.to_string())?;
    println!(
        "Saved combined mask ({} boundary pixels) to {}",
        result.combined_count,
        config.output.combined.display()
    );
    println!("Saved summary to {}", config.output.summary_json.display());
    Ok(())
}

fn trace(config: &TraceToolConfig) -> Result<TraceSummary, GeometryError> {
    let coordinates = Coordinates::from_path(&config.coordinates)?;
    let mut xyz = read_geom3d_from_path(&config.xyz)?;
    let mut dist = read_geom1d_from_path(&config.dist)?;
    let nor = read_geom3d_from_path(&config.nor)?;

    standard_units_1d(&mut dist, &coordinates);
    standard_units_3d(&mut xyz, &coordinates);

    let (combined, trace) =
        geometry_discontinuities_traced(&coordinates, &xyz, &dist, &nor, &config.params)?;

    save_deviation_png(&trace.position_deviation, &config.output.position_deviation)?;
    save_mask_png(&trace.position_boundaries, &config.output.position_boundaries)?;
    save_deviation_png(
        &trace.orientation_deviation,
        &config.output.orientation_deviation,
    )?;
    save_mask_png(
        &trace.orientation_boundaries,
        &config.output.orientation_boundaries,
    )?;
    save_mask_png(&combined, &config.output.combined)?;

    let summary = TraceSummary {
        width: combined.w,
        height: combined.h,
        units: coordinates.units,
        params: config.params.clone(),
        position_count: trace.position_boundaries.count_true(),
        orientation_count: trace.orientation_boundaries.count_true(),
        combined_count: combined.count_true(),
        position_ms: trace.position_ms,
        orientation_ms: trace.orientation_ms,
        maxima_ms: trace.maxima_ms,
    };
    write_json_file(&config.output.summary_json, &summary)?;
    Ok(summary)
}

fn usage() -> String {
    "Usage: boundary_trace <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceSummary {
    width: usize,
    height: usize,
    units: DistanceUnit,
    params: BoundaryParams,
    position_count: usize,
    orientation_count: usize,
    combined_count: usize,
    position_ms: f64,
    orientation_ms: f64,
    maxima_ms: f64,
}
