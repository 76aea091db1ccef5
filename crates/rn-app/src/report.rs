//! Serializable pipeline reports.

use rn_core::Real;
use rn_geo::{AttributionStatus, CategoryCount, DistanceSummary, MatchResult};
use rn_graph::{BuildDiagnostics, ConnectivityReport};
use rn_names::Collision;
use rn_records::RegionLabels;
use serde::{Deserialize, Serialize};

/// Attribution outcome of one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Matched,
    NoCoordinates,
    NoReference,
}

/// One station's attribution, flattened for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRow {
    pub query_id: String,
    pub status: RowStatus,
    pub matched_reference_name: Option<String>,
    /// Category copied from the matched reference.
    pub matched_category: Option<String>,
    /// `matched_category` after label translation.
    pub region: Option<String>,
    pub distance_km: Option<Real>,
}

impl AttributionRow {
    pub(crate) fn from_match(result: &MatchResult, labels: &RegionLabels) -> Self {
        let (status, matched) = match &result.status {
            AttributionStatus::Matched(m) => (RowStatus::Matched, Some(m)),
            AttributionStatus::NoCoordinates => (RowStatus::NoCoordinates, None),
            AttributionStatus::NoReference => (RowStatus::NoReference, None),
        };
        Self {
            query_id: result.query_id.clone(),
            status,
            matched_reference_name: matched.map(|m| m.reference_name.clone()),
            matched_category: matched.map(|m| m.category.clone()),
            region: matched.map(|m| labels.label(&m.category).to_string()),
            distance_km: matched.map(|m| m.distance_km),
        }
    }
}

/// Result of `assign-regions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionReport {
    /// RFC 3339 timestamp.
    pub generated_at: String,
    pub station_count: usize,
    /// Station rows dropped because their id was already seen.
    pub duplicate_stations: usize,
    pub reference_count: usize,
    /// Gazetteer rows without usable coordinates.
    pub excluded_references: usize,
    pub matched: usize,
    pub no_coordinates: usize,
    pub no_reference: usize,
    pub distances: Option<DistanceSummary>,
    /// Station counts per labelled region.
    pub distribution: Vec<CategoryCount>,
    pub rows: Vec<AttributionRow>,
}

impl AttributionReport {
    pub fn row(&self, query_id: &str) -> Option<&AttributionRow> {
        self.rows.iter().find(|r| r.query_id == query_id)
    }
}

/// Tracks selected by the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredTracks {
    pub filter: String,
    pub total: usize,
    /// Filtered tracks with coordinates at both ends.
    pub drawable: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDegree {
    pub code: String,
    pub name: Option<String>,
    pub degree: usize,
}

/// Result of `build`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    /// RFC 3339 timestamp.
    pub generated_at: String,
    /// Year the input was filtered to, if any.
    pub snapshot_year: Option<i32>,
    pub connectivity: ConnectivityReport,
    pub diagnostics: BuildDiagnostics,
    /// Station names that canonicalized to an already indexed key.
    pub collisions: Vec<Collision>,
    /// Station names that canonicalize to nothing and cannot be matched.
    pub unmatchable_names: usize,
    pub tracks_with_year: usize,
    pub tracks_without_year: usize,
    pub categories: Vec<String>,
    pub stations_with_region: usize,
    pub regions: Vec<String>,
    pub filtered: FilteredTracks,
    /// Busiest stations first.
    pub top_degree: Vec<StationDegree>,
}
