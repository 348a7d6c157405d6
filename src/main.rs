// src/main.rs
mod drivers;
mod types;
mod viewer;

use std::path::Path;

use anyhow::Context;
use log::{debug, error};

use drivers::{resolve_archive, NpzArchive, VizConfig, VizError, VizPipeline};
use viewer::WindowSink;

// Folder holding the extracted IMU recordings
const DATA_DIR: &str = "data/extracted";
// Set to Some("path/to/file.npz") to skip the newest-file lookup
const MANUAL_ARCHIVE: Option<&str> = None;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = VizConfig::new(DATA_DIR, MANUAL_ARCHIVE.map(Path::new));
    debug!("config: {}", serde_json::to_string(&config)?);

    let archive = match resolve_archive(&config) {
        Ok(path) => path,
        Err(err @ VizError::NoInputFound { .. }) => {
            error!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let label = archive
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "figure".to_owned());
    let mut sink = WindowSink::new(".", label);
    let pipeline = VizPipeline::new(NpzArchive::new(&archive), config)?;
    pipeline
        .run(&mut sink)
        .with_context(|| format!("visualising {}", archive.display()))?;
    Ok(())
}
