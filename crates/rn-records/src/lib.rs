//! rn-records: record schema, CSV loading and run configuration.

pub mod load;
pub mod schema;
pub mod validate;

pub use load::{
    Loaded, load_gazetteer, load_stations, load_tracks, read_gazetteer, read_stations,
    read_tracks, save_stations, write_stations,
};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

/// Newest configuration format understood by this crate.
pub const LATEST_VERSION: u32 = 1;

pub type RecordsResult<T> = Result<T, RecordsError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordsError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read {path}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn load_config_yaml(path: &std::path::Path) -> RecordsResult<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PipelineConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config_yaml(path: &std::path::Path, config: &PipelineConfig) -> RecordsResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
