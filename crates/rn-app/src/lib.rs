//! Shared application service layer for railnet.
//!
//! This crate wires the library crates into the two pipeline runs the CLI
//! exposes: attributing stations to regions, and building and analyzing the
//! network.

pub mod dataset_service;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod snapshot;

pub use dataset_service::{
    load_config, load_gazetteer, load_report, load_stations, load_tracks, save_report,
    save_stations, to_json,
};
pub use error::{AppError, AppResult};
pub use pipeline::{build_and_analyze, merge_regions, run_attribution};
pub use report::{
    AttributionReport, AttributionRow, FilteredTracks, NetworkReport, RowStatus, StationDegree,
};
pub use snapshot::{Snapshot, YearSelection, select_snapshot};
