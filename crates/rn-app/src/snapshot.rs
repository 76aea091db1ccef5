//! Selection of one yearly snapshot from multi-year tables.

use rn_records::{StationRecord, TrackRecord};
use tracing::info;

/// Which year of the input tables to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearSelection {
    /// The latest year found in the station table.
    #[default]
    Latest,
    Year(i32),
    /// Every row, whatever its year.
    All,
}

/// Station and track rows of one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// None when no filtering took place.
    pub year: Option<i32>,
    pub stations: Vec<StationRecord>,
    pub tracks: Vec<TrackRecord>,
}

/// Keep the rows of the selected year.
///
/// A table in which no row carries a readable year is taken whole; otherwise
/// only rows whose year equals the selected one are kept. Rows are never
/// assigned a year they do not state.
pub fn select_snapshot(
    stations: &[StationRecord],
    tracks: &[TrackRecord],
    selection: YearSelection,
) -> Snapshot {
    let station_year = |s: &StationRecord| s.year.as_deref().and_then(rn_core::parse_year);
    let track_year = |t: &TrackRecord| t.year.as_deref().and_then(rn_core::parse_year);

    let year = match selection {
        YearSelection::All => None,
        YearSelection::Year(y) => Some(y),
        YearSelection::Latest => stations.iter().filter_map(station_year).max(),
    };

    let Some(year) = year else {
        return Snapshot {
            year: None,
            stations: stations.to_vec(),
            tracks: tracks.to_vec(),
        };
    };

    let stations = filter_year(stations, station_year, year);
    let tracks = filter_year(tracks, track_year, year);
    info!(
        year,
        stations = stations.len(),
        tracks = tracks.len(),
        "snapshot selected"
    );

    Snapshot {
        year: Some(year),
        stations,
        tracks,
    }
}

fn filter_year<T: Clone>(rows: &[T], year_of: impl Fn(&T) -> Option<i32>, year: i32) -> Vec<T> {
    if rows.iter().all(|r| year_of(r).is_none()) {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| year_of(*r) == Some(year))
        .cloned()
        .collect()
}
