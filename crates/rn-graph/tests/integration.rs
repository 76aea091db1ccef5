//! Integration tests for rn-graph.

use proptest::prelude::*;
use rn_core::{Tolerances, nearly_equal};
use rn_graph::{BuildYear, CategoryFilter, NetworkBuilder, TrackSpec, analyze, build_network};
use rn_names::{Canonicalizer, EntityIndex};
use rn_records::{StationRecord, TrackRecord, TrackTypeTable};

fn index_for(canon: &Canonicalizer, stations: &[StationRecord]) -> EntityIndex {
    EntityIndex::build(
        canon,
        stations.iter().map(|s| (s.id.as_str(), s.name.as_deref())),
    )
}

fn build(stations: &[StationRecord], tracks: &[TrackRecord]) -> rn_graph::NetworkBuild {
    let canon = Canonicalizer::default();
    let index = index_for(&canon, stations);
    build_network(stations, tracks, &index, &canon, &TrackTypeTable::default()).unwrap()
}

#[test]
fn two_station_line() {
    let stations = vec![
        StationRecord::new("S1", "Alpha").with_coords(39.9, 116.4),
        StationRecord::new("S2", "Beta").with_coords(39.1, 117.2),
    ];
    let tracks = vec![TrackRecord::new("alpha", "BETA", 120.0, "rail_both").with_year("1990")];

    let built = build(&stations, &tracks);
    let network = &built.network;
    assert_eq!(network.station_count(), 2);
    assert_eq!(network.track_count(), 1);
    assert_eq!(network.tracks()[0].year, BuildYear::Known(1990));

    let report = analyze(network);
    assert_eq!(report.component_count, 1);
    assert!(report.is_connected);
    assert_eq!(report.largest_component_size, 2);
    assert!(nearly_equal(report.density, 1.0, Tolerances::default()));
}

#[test]
fn parallel_tracks_stay_distinct() {
    let stations = vec![StationRecord::new("S1", "Alpha"), StationRecord::new("S2", "Beta")];
    let tracks = vec![
        TrackRecord::new("Alpha", "Beta", 10.0, "rail pass").with_year("1990"),
        TrackRecord::new("Alpha", "Beta", 12.5, "road").with_edge_id("E2"),
        TrackRecord::new("Alpha", "Beta", 10.0, "rail pass").with_year("1990"),
    ];

    let built = build(&stations, &tracks);
    let network = &built.network;
    let a = network.station_by_code("S1").unwrap().id;
    let b = network.station_by_code("S2").unwrap().id;

    let between: Vec<_> = network.tracks_between(a, b).collect();
    assert_eq!(between.len(), 3);
    assert_eq!(between[0].category, "rail_pass");
    assert_eq!(between[1].category, "road");
    assert_eq!(between[1].edge_id.as_deref(), Some("E2"));
    assert_eq!(network.tracks_between(b, a).count(), 0);

    // Density counts every parallel edge.
    let report = analyze(network);
    assert_eq!(report.edge_count, 3);
    assert!(nearly_equal(report.density, 3.0, Tolerances::default()));
}

#[test]
fn unresolved_endpoints_are_skipped_and_reported_once() {
    let stations = vec![StationRecord::new("S1", "Alpha"), StationRecord::new("S2", "Beta")];
    let tracks = vec![
        TrackRecord::new("Alpha", "Gamma", 5.0, "rail_good"),
        TrackRecord::new("Gamma", "Delta", 5.0, "rail_good"),
        TrackRecord::new("Alpha", "Beta", 5.0, "rail_good"),
    ];

    let built = build(&stations, &tracks);
    assert_eq!(built.network.track_count(), 1);
    assert_eq!(built.diagnostics.skipped_tracks, 2);
    assert_eq!(
        built.diagnostics.unresolved_endpoints,
        vec!["Gamma".to_string(), "Delta".to_string()]
    );
}

#[test]
fn blank_year_stays_unknown() {
    let stations = vec![StationRecord::new("S1", "Alpha"), StationRecord::new("S2", "Beta")];
    let tracks = vec![
        TrackRecord::new("Alpha", "Beta", 1.0, "road").with_year("1990"),
        TrackRecord::new("Alpha", "Beta", 1.0, "road").with_year(""),
        TrackRecord::new("Alpha", "Beta", 1.0, "road"),
    ];

    let built = build(&stations, &tracks);
    let years: Vec<_> = built.network.tracks().iter().map(|t| t.year).collect();
    assert_eq!(
        years,
        vec![BuildYear::Known(1990), BuildYear::Unknown, BuildYear::Unknown]
    );
    assert_eq!(built.network.tracks()[1].year_raw.as_deref(), Some(""));
}

#[test]
fn self_loop_counts_twice_in_degree() {
    let stations = vec![StationRecord::new("S1", "Alpha")];
    let tracks = vec![TrackRecord::new("Alpha", "alpha", 0.5, "rail_both")];

    let built = build(&stations, &tracks);
    let a = built.network.station_by_code("S1").unwrap().id;
    assert_eq!(built.diagnostics.self_loops, 1);
    assert_eq!(built.network.degree(a), 2);

    let report = analyze(&built.network);
    assert_eq!(report.component_count, 1);
    assert_eq!(report.density, 0.0);
}

#[test]
fn category_filter_leaves_network_untouched() {
    let stations = vec![
        StationRecord::new("S1", "Alpha").with_coords(1.0, 1.0).with_region("P1"),
        StationRecord::new("S2", "Beta").with_coords(2.0, 2.0).with_region("P2"),
        StationRecord::new("S3", "Gamma"),
    ];
    let tracks = vec![
        TrackRecord::new("Alpha", "Beta", 1.0, "rail pass"),
        TrackRecord::new("Alpha", "Gamma", 1.0, "RAIL_good"),
        TrackRecord::new("Beta", "Gamma", 1.0, "road"),
    ];

    let built = build(&stations, &tracks);
    let network = &built.network;
    let rail = CategoryFilter::containing("rail");

    assert_eq!(network.tracks_matching(&rail).count(), 2);
    // Gamma has no coordinates.
    assert_eq!(network.drawable_tracks(&rail).count(), 1);
    assert_eq!(network.track_count(), 3);

    let categories: Vec<_> = network.categories().into_iter().collect();
    assert_eq!(categories, vec!["RAIL_good", "rail_pass", "road"]);
    let regions: Vec<_> = network.regions().into_iter().collect();
    assert_eq!(regions, vec!["P1", "P2"]);
}

#[test]
fn empty_and_edgeless_networks() {
    let empty = NetworkBuilder::new().build().unwrap();
    let report = analyze(&empty);
    assert_eq!(report.vertex_count, 0);
    assert_eq!(report.component_count, 0);
    assert_eq!(report.largest_component_size, 0);
    assert_eq!(report.density, 0.0);
    assert!(!report.is_connected);

    let stations = vec![
        StationRecord::new("S1", "Alpha"),
        StationRecord::new("S2", "Beta"),
        StationRecord::new("S3", "Gamma"),
    ];
    let built = build(&stations, &[]);
    let report = analyze(&built.network);
    assert_eq!(report.component_count, 3);
    assert_eq!(report.largest_component_size, 1);
    assert_eq!(report.density, 0.0);
    assert!(!report.is_connected);
}

proptest! {
    #[test]
    fn components_bounded_by_vertices(
        n in 1_usize..12,
        edges in prop::collection::vec((0_usize..12, 0_usize..12), 0..30),
    ) {
        let mut builder = NetworkBuilder::new();
        let ids: Vec<_> = (0..n)
            .map(|i| builder.add_station(&StationRecord::new(format!("S{i}"), format!("N{i}"))).unwrap())
            .collect();
        for (s, t) in &edges {
            builder.add_track(ids[s % n], ids[t % n], TrackSpec::new("rail_both"));
        }
        let network = builder.build().unwrap();
        let report = analyze(&network);

        prop_assert!(report.component_count >= 1);
        prop_assert!(report.component_count <= n);
        prop_assert!(report.largest_component_size <= n);
        prop_assert_eq!(report.edge_count, edges.len());

        let total_degree: usize = network.stations().iter().map(|s| network.degree(s.id)).sum();
        prop_assert_eq!(total_degree, 2 * edges.len());
    }
}
