//! Incremental network builder.

use rn_core::{CoreResult, Real, StationId, TrackId};
use rn_records::StationRecord;

use crate::graph::{BuildYear, Network, Station, Track};
use crate::indexing::StationCodes;
use crate::validate;

/// Attributes of a track about to be added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSpec {
    pub length_km: Option<Real>,
    pub category: String,
    pub year_raw: Option<String>,
    pub edge_id: Option<String>,
}

impl TrackSpec {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_length(mut self, length_km: Real) -> Self {
        self.length_km = Some(length_km);
        self
    }

    pub fn with_year(mut self, year_raw: impl Into<String>) -> Self {
        self.year_raw = Some(year_raw.into());
        self
    }
}

/// Builder for constructing a network incrementally.
///
/// Use `add_station` and `add_track` to build up the network,
/// then call `build()` to validate and freeze it into an immutable `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    stations: Vec<Station>,
    tracks: Vec<Track>,
    codes: StationCodes,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station from its source record.
    ///
    /// A record whose id is already registered is not added; the existing
    /// station's ID is returned as the error.
    pub fn add_station(&mut self, record: &StationRecord) -> Result<StationId, StationId> {
        let id = self.codes.register(&record.id)?;
        self.stations.push(Station {
            id,
            code: record.id.clone(),
            name: record.name.clone(),
            region: record.region.clone(),
            latitude: rn_core::finite(record.latitude),
            longitude: rn_core::finite(record.longitude),
        });
        Ok(id)
    }

    /// Look up an already added station by source id.
    pub fn station_id(&self, code: &str) -> Option<StationId> {
        self.codes.get(code)
    }

    /// Append a track. Existing tracks between the same stations are untouched.
    pub fn add_track(&mut self, source: StationId, target: StationId, spec: TrackSpec) -> TrackId {
        let id = TrackId::from_index(self.tracks.len() as u32);
        let year = BuildYear::from_raw(spec.year_raw.as_deref());
        self.tracks.push(Track {
            id,
            source,
            target,
            length_km: spec.length_km,
            category: spec.category,
            year,
            year_raw: spec.year_raw,
            edge_id: spec.edge_id,
        });
        id
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Build and validate the network, returning an immutable `Network`.
    pub fn build(self) -> CoreResult<Network> {
        validate::validate_structure(&self.stations, &self.tracks)?;

        let (station_track_offsets, station_tracks) =
            Self::build_adjacency(self.stations.len(), &self.tracks);

        validate::validate_adjacency(
            &self.stations,
            &self.tracks,
            &station_track_offsets,
            &station_tracks,
        )?;

        Ok(Network {
            stations: self.stations,
            tracks: self.tracks,
            codes: self.codes,
            station_track_offsets,
            station_tracks,
        })
    }

    /// Compact adjacency: for each station, its incident tracks in ID order.
    fn build_adjacency(station_count: usize, tracks: &[Track]) -> (Vec<usize>, Vec<TrackId>) {
        let mut per_station: Vec<Vec<TrackId>> = vec![Vec::new(); station_count];
        for track in tracks {
            per_station[track.source.slot()].push(track.id);
            per_station[track.target.slot()].push(track.id);
        }

        let mut offsets = Vec::with_capacity(station_count + 1);
        let mut flat = Vec::with_capacity(tracks.len() * 2);
        offsets.push(0);
        for list in per_station {
            flat.extend(list);
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}
