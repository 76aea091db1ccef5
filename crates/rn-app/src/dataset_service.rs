//! Loading of configuration and input tables, and report persistence.

use std::path::Path;

use rn_records::{GazetteerRecord, Loaded, PipelineConfig, StationRecord, TrackRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Load the pipeline configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> AppResult<PipelineConfig> {
    match path {
        Some(path) => {
            let config = rn_records::load_config_yaml(path)?;
            info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(PipelineConfig::default()),
    }
}

pub fn load_stations(path: &Path) -> AppResult<Loaded<StationRecord>> {
    Ok(rn_records::load_stations(path)?)
}

pub fn load_tracks(path: &Path) -> AppResult<Loaded<TrackRecord>> {
    Ok(rn_records::load_tracks(path)?)
}

pub fn load_gazetteer(path: &Path, config: &PipelineConfig) -> AppResult<Loaded<GazetteerRecord>> {
    let delimiter = u8::try_from(config.gazetteer_delimiter).map_err(|_| {
        AppError::InvalidInput(format!(
            "gazetteer delimiter {:?} is not a single byte",
            config.gazetteer_delimiter
        ))
    })?;
    Ok(rn_records::load_gazetteer(path, delimiter)?)
}

/// Write station records (e.g. with merged regions) as CSV.
pub fn save_stations(path: &Path, stations: &[StationRecord]) -> AppResult<()> {
    Ok(rn_records::save_stations(path, stations)?)
}

/// Render a report as pretty JSON.
pub fn to_json<T: Serialize>(report: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Save a report as pretty JSON.
pub fn save_report<T: Serialize>(path: &Path, report: &T) -> AppResult<()> {
    let content = to_json(report)?;
    std::fs::write(path, content).map_err(|e| AppError::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Load a report previously written by [`save_report`].
pub fn load_report<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ReportRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}
