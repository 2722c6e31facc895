//! Offline tool: render one image file as a pencil sketch.
//!
//! Driven by a small JSON config:
//! `{ "input": "photo.jpg", "output": "photo_sketch.png", "sketch": { ... } }`
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pencil_sketch::error::SketchError;
use pencil_sketch::image::codec;
use pencil_sketch::sketch::{sketch, SketchParams};

#[derive(Debug, Deserialize)]
struct SketchToolConfig {
    input: PathBuf,
    output: PathBuf,
    #[serde(default)]
    sketch: SketchParams,
}

fn load_config(path: &Path) -> Result<SketchToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let input = codec::load_rgb(&config.input).map_err(describe)?;
    let out = sketch(&input, &config.sketch).map_err(|e| e.to_string())?;
    codec::save_gray_png(&out, &config.output).map_err(describe)?;

    println!(
        "{} ({}x{}) -> {}",
        config.input.display(),
        out.w,
        out.h,
        config.output.display()
    );
    Ok(())
}

fn describe(err: SketchError) -> String {
    err.to_string()
}

fn usage() -> String {
    "Usage: sketch_file <config.json>".to_string()
}
