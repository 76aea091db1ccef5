//! Network validation logic.

use rn_core::{CoreResult, TrackId};

use crate::error::GraphError;
use crate::graph::{Station, Track};

/// Validate the arena: IDs match their slots and every endpoint exists.
pub(crate) fn validate_structure(stations: &[Station], tracks: &[Track]) -> CoreResult<()> {
    for (slot, station) in stations.iter().enumerate() {
        if station.id.slot() != slot {
            return Err(GraphError::NonContiguousId {
                what: "Station",
                id: station.id.index(),
                slot,
            }
            .into());
        }
    }

    for (slot, track) in tracks.iter().enumerate() {
        if track.id.slot() != slot {
            return Err(GraphError::NonContiguousId {
                what: "Track",
                id: track.id.index(),
                slot,
            }
            .into());
        }
        for station in [track.source, track.target] {
            if station.slot() >= stations.len() {
                return Err(GraphError::InvalidEndpoint {
                    track: track.id,
                    station,
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Validate adjacency lists against the track endpoints.
///
/// Every track must appear exactly twice across all lists: once under each
/// endpoint, or twice under the same station for a self-loop.
pub(crate) fn validate_adjacency(
    stations: &[Station],
    tracks: &[Track],
    offsets: &[usize],
    station_tracks: &[TrackId],
) -> CoreResult<()> {
    if offsets.len() != stations.len() + 1 || offsets.last() != Some(&station_tracks.len()) {
        return Err(rn_core::CoreError::IndexOob {
            what: "station adjacency offsets",
            index: offsets.len(),
            len: stations.len() + 1,
        });
    }

    let mut seen = vec![0_u8; tracks.len()];
    for station in stations {
        let idx = station.id.slot();
        for &track_id in &station_tracks[offsets[idx]..offsets[idx + 1]] {
            let inconsistent = GraphError::InconsistentAdjacency {
                track: track_id,
                station: station.id,
            };
            let Some(track) = tracks.get(track_id.slot()) else {
                return Err(inconsistent.into());
            };
            if track.source != station.id && track.target != station.id {
                return Err(inconsistent.into());
            }
            seen[track_id.slot()] += 1;
            if seen[track_id.slot()] > 2 {
                return Err(inconsistent.into());
            }
        }
    }

    if let Some(track) = tracks.iter().find(|t| seen[t.id.slot()] != 2) {
        return Err(GraphError::InconsistentAdjacency {
            track: track.id,
            station: track.source,
        }
        .into());
    }

    Ok(())
}
