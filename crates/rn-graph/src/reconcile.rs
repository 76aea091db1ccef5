//! Reconciliation of station and track records into a network.
//!
//! Bad records never abort the build: duplicate stations and tracks with
//! unresolvable endpoints are skipped and reported in [`BuildDiagnostics`].

use std::collections::HashSet;

use rn_core::{CoreResult, StationId};
use rn_names::{Canonicalizer, EntityIndex};
use rn_records::{StationRecord, TrackRecord, TrackTypeTable};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::{NetworkBuilder, TrackSpec};
use crate::graph::Network;

/// What the build skipped or found suspicious.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    /// Endpoint labels that matched no station, deduplicated in first-seen order.
    pub unresolved_endpoints: Vec<String>,
    /// Tracks dropped because an endpoint was unresolved.
    pub skipped_tracks: usize,
    /// Station ids seen again after their first row.
    pub duplicate_station_rows: Vec<String>,
    /// Built tracks without a usable length.
    pub missing_length: usize,
    pub self_loops: usize,
}

/// Unresolved endpoint labels, deduplicated in first-seen order.
#[derive(Debug, Default)]
struct UnresolvedLabels {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl UnresolvedLabels {
    fn note(&mut self, label: Option<&str>) {
        let label = label.unwrap_or_default();
        if self.seen.insert(label.to_string()) {
            self.ordered.push(label.to_string());
        }
    }
}

#[derive(Debug, Clone)]
pub struct NetworkBuild {
    pub network: Network,
    pub diagnostics: BuildDiagnostics,
}

/// Build the network from station and track records.
///
/// Track endpoints are raw station names; each is resolved through `index`
/// to a station id and then to the station added for that id.
pub fn build_network(
    stations: &[StationRecord],
    tracks: &[TrackRecord],
    index: &EntityIndex,
    canon: &Canonicalizer,
    types: &TrackTypeTable,
) -> CoreResult<NetworkBuild> {
    let mut builder = NetworkBuilder::new();
    let mut diagnostics = BuildDiagnostics::default();
    let mut unresolved = UnresolvedLabels::default();

    for record in stations {
        if builder.add_station(record).is_err() {
            warn!(station_id = record.id.as_str(), "duplicate station row ignored");
            diagnostics.duplicate_station_rows.push(record.id.clone());
        }
    }

    let resolve = |builder: &NetworkBuilder, label: Option<&str>| -> Option<StationId> {
        index
            .lookup(canon, label)
            .and_then(|code| builder.station_id(code))
    };

    for record in tracks {
        let source = resolve(&builder, record.source_name.as_deref());
        let target = resolve(&builder, record.target_name.as_deref());

        let (Some(source), Some(target)) = (source, target) else {
            if source.is_none() {
                unresolved.note(record.source_name.as_deref());
            }
            if target.is_none() {
                unresolved.note(record.target_name.as_deref());
            }
            debug!(
                source = record.source_name.as_deref().unwrap_or_default(),
                target = record.target_name.as_deref().unwrap_or_default(),
                "track endpoint unresolved; skipped"
            );
            diagnostics.skipped_tracks += 1;
            continue;
        };

        let length_km = rn_core::non_negative(record.length);
        if length_km.is_none() {
            diagnostics.missing_length += 1;
        }
        builder.add_track(
            source,
            target,
            TrackSpec {
                length_km,
                category: types.standardize(&record.category),
                year_raw: record.year.clone(),
                edge_id: record.edge_id.clone(),
            },
        );
    }

    diagnostics.unresolved_endpoints = unresolved.ordered;
    if !diagnostics.unresolved_endpoints.is_empty() {
        warn!(
            labels = diagnostics.unresolved_endpoints.len(),
            skipped_tracks = diagnostics.skipped_tracks,
            "unresolved track endpoints"
        );
    }

    let network = builder.build()?;
    diagnostics.self_loops = network.tracks().iter().filter(|t| t.is_self_loop()).count();
    info!(
        stations = network.station_count(),
        tracks = network.track_count(),
        "network built"
    );

    Ok(NetworkBuild {
        network,
        diagnostics,
    })
}
