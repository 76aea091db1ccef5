//! Core network data structures.

use std::collections::BTreeSet;

use rn_core::{Real, StationId, TrackId};
use serde::{Deserialize, Serialize};

use crate::indexing::StationCodes;

/// A station (graph vertex).
///
/// Attributes are carried exactly as they appeared in the source record;
/// absent coordinates and regions stay absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// Identifier from the source table.
    pub code: String,
    pub name: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<Real>,
    pub longitude: Option<Real>,
}

impl Station {
    /// Both coordinates, if both are present and finite.
    pub fn coords(&self) -> Option<(Real, Real)> {
        match (rn_core::finite(self.latitude), rn_core::finite(self.longitude)) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Construction year of a track.
///
/// `Unknown` is a value in its own right: it is what the source said, and it
/// is never replaced by a year taken from a neighbouring record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildYear {
    Known(i32),
    Unknown,
}

impl BuildYear {
    /// Interpret the raw year text of a source record.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(rn_core::parse_year)
            .map_or(BuildYear::Unknown, BuildYear::Known)
    }

    pub fn known(self) -> Option<i32> {
        match self {
            BuildYear::Known(y) => Some(y),
            BuildYear::Unknown => None,
        }
    }
}

/// A track (graph edge). Tracks sharing endpoints are distinct edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub source: StationId,
    pub target: StationId,
    /// Kilometers; absent when the source value was missing or malformed.
    pub length_km: Option<Real>,
    /// Standardized type label.
    pub category: String,
    pub year: BuildYear,
    /// Year text as written in the source, kept for traceability.
    pub year_raw: Option<String>,
    pub edge_id: Option<String>,
}

impl Track {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Selects tracks whose category contains a substring, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    needle: String,
}

impl CategoryFilter {
    pub fn containing(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        category.to_lowercase().contains(&self.needle)
    }
}

/// The network: a validated, immutable multigraph of stations and tracks.
///
/// The network stores:
/// - All stations and tracks in vectors (indexed by their IDs).
/// - Compact adjacency: for each station, which tracks are incident.
///
/// Nothing here deduplicates by endpoint pair, so parallel tracks and
/// self-loops are kept as separate entries.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) stations: Vec<Station>,
    pub(crate) tracks: Vec<Track>,
    pub(crate) codes: StationCodes,

    /// Offsets for station->track adjacency: station i's tracks are in
    /// station_tracks[station_track_offsets[i]..station_track_offsets[i+1]].
    pub(crate) station_track_offsets: Vec<usize>,

    /// Flat list of incident track IDs, sorted by station ID then track ID.
    /// A self-loop appears twice in its station's list.
    pub(crate) station_tracks: Vec<TrackId>,
}

impl Network {
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Get a station by ID (returns None if ID out of bounds).
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.slot())
    }

    /// Get a track by ID (returns None if ID out of bounds).
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id.slot())
    }

    /// Look up a station by its source identifier.
    pub fn station_by_code(&self, code: &str) -> Option<&Station> {
        self.codes.get(code).and_then(|id| self.station(id))
    }

    /// Track IDs incident to a station.
    pub fn station_tracks(&self, id: StationId) -> &[TrackId] {
        let idx = id.slot();
        if idx >= self.stations.len() {
            return &[];
        }
        let start = self.station_track_offsets[idx];
        let end = self.station_track_offsets[idx + 1];
        &self.station_tracks[start..end]
    }

    /// Number of incident tracks; a self-loop counts twice.
    pub fn degree(&self, id: StationId) -> usize {
        self.station_tracks(id).len()
    }

    /// Tracks between `source` and `target` in that direction, in insertion order.
    pub fn tracks_between(
        &self,
        source: StationId,
        target: StationId,
    ) -> impl Iterator<Item = &Track> + '_ {
        self.tracks
            .iter()
            .filter(move |t| t.source == source && t.target == target)
    }

    /// Tracks whose category passes `filter`. The network is not modified.
    pub fn tracks_matching<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = &'a Track> + 'a {
        self.tracks.iter().filter(move |t| filter.matches(&t.category))
    }

    /// Filtered tracks whose two endpoints both have coordinates.
    pub fn drawable_tracks<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = &'a Track> + 'a {
        self.tracks_matching(filter).filter(move |t| {
            let has = |id| self.station(id).and_then(Station::coords).is_some();
            has(t.source) && has(t.target)
        })
    }

    /// Distinct track categories, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.tracks.iter().map(|t| t.category.as_str()).collect()
    }

    /// Distinct station regions, sorted. Stations without a region are skipped.
    pub fn regions(&self) -> BTreeSet<&str> {
        self.stations
            .iter()
            .filter_map(|s| s.region.as_deref())
            .collect()
    }
}
