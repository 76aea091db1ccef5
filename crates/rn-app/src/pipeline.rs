//! Pipeline stages wired together: region attribution and network analysis.

use std::collections::{HashMap, HashSet};

use rn_geo::{CategoryCount, DistanceSummary, QueryPoint, ReferencePoint};
use rn_graph::{CategoryFilter, Network, NetworkBuild};
use rn_names::{Canonicalizer, EntityIndex};
use rn_records::{GazetteerRecord, PipelineConfig, StationRecord, TrackRecord};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::report::{
    AttributionReport, AttributionRow, FilteredTracks, NetworkReport, RowStatus, StationDegree,
};
use crate::snapshot::Snapshot;

/// How many stations the network report lists by degree.
const TOP_DEGREE: usize = 10;

/// Attribute each station to the region of its nearest gazetteer entry.
///
/// Stations are de-duplicated by id first (the first row wins). Region labels
/// from the configuration are applied to the copied category.
pub fn run_attribution(
    config: &PipelineConfig,
    stations: &[StationRecord],
    gazetteer: &[GazetteerRecord],
) -> AttributionReport {
    let mut seen = HashSet::new();
    let queries: Vec<QueryPoint> = stations
        .iter()
        .filter(|s| seen.insert(s.id.as_str()))
        .map(|s| QueryPoint::new(s.id.clone(), s.latitude, s.longitude))
        .collect();
    let duplicate_stations = stations.len() - queries.len();
    if duplicate_stations > 0 {
        warn!(duplicate_stations, "duplicate station ids ignored for attribution");
    }

    let references: Vec<ReferencePoint> = gazetteer
        .iter()
        .map(|g| ReferencePoint::new(g.name.clone(), g.category.clone(), g.latitude, g.longitude))
        .collect();

    let assignment = rn_geo::assign(&queries, &references);
    let labels = &config.region_labels;

    let rows: Vec<AttributionRow> = assignment
        .matches
        .iter()
        .map(|m| AttributionRow::from_match(m, labels))
        .collect();

    let distribution = labelled_distribution(&rows);
    let distances = DistanceSummary::from_assignment(&assignment);
    if let Some(d) = &distances {
        info!(
            mean_km = d.mean_km,
            median_km = d.median_km,
            max_km = d.max_km,
            "attribution distances"
        );
    }

    AttributionReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        station_count: queries.len(),
        duplicate_stations,
        reference_count: references.len(),
        excluded_references: assignment.excluded_references,
        matched: assignment.matched_count(),
        no_coordinates: assignment.no_coordinates,
        no_reference: assignment.no_reference,
        distances,
        distribution,
        rows,
    }
}

/// Region counts after label translation, largest first, ties by name.
fn labelled_distribution(rows: &[AttributionRow]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for region in rows.iter().filter_map(|r| r.region.as_deref()) {
        *counts.entry(region).or_default() += 1;
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Copy attributed regions onto station records.
///
/// Only matched rows overwrite a region; every other station keeps what it
/// had, including no region at all.
pub fn merge_regions(stations: &[StationRecord], report: &AttributionReport) -> Vec<StationRecord> {
    let regions: HashMap<&str, &str> = report
        .rows
        .iter()
        .filter(|r| r.status == RowStatus::Matched)
        .filter_map(|r| r.region.as_deref().map(|region| (r.query_id.as_str(), region)))
        .collect();

    stations
        .iter()
        .map(|s| {
            let mut merged = s.clone();
            if let Some(region) = regions.get(s.id.as_str()) {
                merged.region = Some((*region).to_string());
            }
            merged
        })
        .collect()
}

/// Build the network from one snapshot's records and analyze it.
///
/// `category` overrides the configured rail filter for the filtered counts;
/// the network itself always holds every track.
pub fn build_and_analyze(
    config: &PipelineConfig,
    snapshot: &Snapshot,
    category: Option<&str>,
) -> AppResult<(NetworkBuild, NetworkReport)> {
    let stations = &snapshot.stations;
    let tracks = &snapshot.tracks;
    let canon = Canonicalizer::with_strip_chars(&config.canonical.strip_chars);
    let index = EntityIndex::build(
        &canon,
        stations.iter().map(|s| (s.id.as_str(), s.name.as_deref())),
    );

    let build = rn_graph::build_network(stations, tracks, &index, &canon, &config.track_types)?;
    let connectivity = rn_graph::analyze(&build.network);

    let filter_text = category.unwrap_or(&config.rail_filter);
    let filter = CategoryFilter::containing(filter_text);
    let network = &build.network;

    let tracks_with_year = network
        .tracks()
        .iter()
        .filter(|t| t.year.known().is_some())
        .count();

    let report = NetworkReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        snapshot_year: snapshot.year,
        connectivity,
        diagnostics: build.diagnostics.clone(),
        collisions: index.collisions().to_vec(),
        unmatchable_names: index.unmatchable_count(),
        tracks_with_year,
        tracks_without_year: network.track_count() - tracks_with_year,
        categories: network.categories().into_iter().map(str::to_string).collect(),
        stations_with_region: network
            .stations()
            .iter()
            .filter(|s| s.region.as_deref().is_some_and(|r| !r.is_empty()))
            .count(),
        regions: network.regions().into_iter().map(str::to_string).collect(),
        filtered: FilteredTracks {
            filter: filter_text.to_string(),
            total: network.tracks_matching(&filter).count(),
            drawable: network.drawable_tracks(&filter).count(),
        },
        top_degree: top_degree(network, TOP_DEGREE),
    };

    info!(
        filter = filter_text,
        filtered = report.filtered.total,
        drawable = report.filtered.drawable,
        "category filter applied"
    );

    Ok((build, report))
}

/// Stations with at least one track, by degree descending then code.
fn top_degree(network: &Network, limit: usize) -> Vec<StationDegree> {
    let mut degrees: Vec<StationDegree> = network
        .stations()
        .iter()
        .map(|s| StationDegree {
            code: s.code.clone(),
            name: s.name.clone(),
            degree: network.degree(s.id),
        })
        .filter(|d| d.degree > 0)
        .collect();
    degrees.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.code.cmp(&b.code)));
    degrees.truncate(limit);
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{YearSelection, select_snapshot};
    use rn_records::RegionLabels;

    #[test]
    fn merge_overwrites_only_matched_rows() {
        let stations = vec![
            StationRecord::new("S1", "Alpha").with_region("OLD"),
            StationRecord::new("S2", "Beta").with_region("KEEP"),
            StationRecord::new("S3", "Gamma"),
        ];
        let row = |id: &str, status, region: Option<&str>| AttributionRow {
            query_id: id.to_string(),
            status,
            matched_reference_name: None,
            matched_category: None,
            region: region.map(str::to_string),
            distance_km: None,
        };
        let report = AttributionReport {
            generated_at: String::new(),
            station_count: 3,
            duplicate_stations: 0,
            reference_count: 0,
            excluded_references: 0,
            matched: 1,
            no_coordinates: 2,
            no_reference: 0,
            distances: None,
            distribution: Vec::new(),
            rows: vec![
                row("S1", RowStatus::Matched, Some("NEW")),
                row("S2", RowStatus::NoCoordinates, None),
                row("S3", RowStatus::NoCoordinates, None),
            ],
        };

        let merged = merge_regions(&stations, &report);
        assert_eq!(merged[0].region.as_deref(), Some("NEW"));
        assert_eq!(merged[1].region.as_deref(), Some("KEEP"));
        assert_eq!(merged[2].region, None);
        // Input untouched.
        assert_eq!(stations[0].region.as_deref(), Some("OLD"));
    }

    #[test]
    fn labels_apply_to_distribution() {
        let config = PipelineConfig {
            region_labels: RegionLabels(
                [("HEBEI".to_string(), "河北省".to_string())]
                    .into_iter()
                    .collect(),
            ),
            ..Default::default()
        };
        let stations = vec![
            StationRecord::new("S1", "A").with_coords(38.0, 114.5),
            StationRecord::new("S2", "B").with_coords(38.1, 114.6),
        ];
        let gazetteer = vec![GazetteerRecord::new("Shijiazhuang", "HEBEI", 38.04, 114.51)];

        let report = run_attribution(&config, &stations, &gazetteer);
        assert_eq!(report.matched, 2);
        assert_eq!(report.distribution.len(), 1);
        assert_eq!(report.distribution[0].category, "河北省");
        assert_eq!(report.distribution[0].count, 2);
        let row = report.row("S1").unwrap();
        assert_eq!(row.matched_category.as_deref(), Some("HEBEI"));
        assert_eq!(row.region.as_deref(), Some("河北省"));
    }

    #[test]
    fn top_degree_orders_busiest_first() {
        let stations = vec![
            StationRecord::new("S1", "A"),
            StationRecord::new("S2", "B"),
            StationRecord::new("S3", "C"),
            StationRecord::new("S4", "D"),
        ];
        let tracks = vec![
            TrackRecord::new("A", "B", 1.0, "road"),
            TrackRecord::new("B", "C", 1.0, "road"),
        ];
        let snapshot = select_snapshot(&stations, &tracks, YearSelection::All);
        let (_, report) = build_and_analyze(&PipelineConfig::default(), &snapshot, None).unwrap();

        let codes: Vec<_> = report.top_degree.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["S2", "S1", "S3"]);
        assert_eq!(report.top_degree[0].degree, 2);
    }

    #[test]
    fn report_counts_stations_with_region() {
        let stations = vec![
            StationRecord::new("S1", "A").with_region("HEBEI").with_year("2020"),
            StationRecord::new("S2", "B").with_region("").with_year("2020"),
            StationRecord::new("S3", "C").with_year("2020"),
            StationRecord::new("S1", "A").with_region("HEBEI").with_year("2015"),
        ];
        let tracks = vec![
            TrackRecord::new("A", "B", 1.0, "rail_both").with_year("2020"),
            TrackRecord::new("A", "C", 1.0, "rail_both").with_year("2015"),
        ];
        let snapshot = select_snapshot(&stations, &tracks, YearSelection::Latest);
        let (build, report) =
            build_and_analyze(&PipelineConfig::default(), &snapshot, None).unwrap();

        assert_eq!(report.snapshot_year, Some(2020));
        assert_eq!(build.network.station_count(), 3);
        assert_eq!(build.network.track_count(), 1);
        assert_eq!(report.stations_with_region, 1);
        assert!(report.diagnostics.duplicate_station_rows.is_empty());
    }
}
