//! End-to-end smoke test for the rn-app pipeline, from CSV files to reports.

use std::path::{Path, PathBuf};

use rn_app::{
    AttributionReport, RowStatus, YearSelection, build_and_analyze, load_config, load_gazetteer,
    load_report, load_stations, load_tracks, merge_regions, run_attribution, save_report,
    select_snapshot,
};

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn attribution_then_network() {
    let temp_dir = std::env::temp_dir().join("rn_app_pipeline_smoke");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let stations = write_fixture(
        &temp_dir,
        "stations.csv",
        "\
station_id,station_name,province,latitude,longitude
S1,Alpha Nan,,1.0,1.0
S2,Beta,,9.0,9.5
S3,Gamma,OLD,,
S1,Alpha Nan,,5.0,5.0
",
    );
    let tracks = write_fixture(
        &temp_dir,
        "tracks.csv",
        "\
start_station,end_station,length,type,year,edge_id
ALPHA  nan.,beta,120.5,rail pass,1990.0,E1
Alpha Nan,Beta,130,road,,E2
Beta,Gamma,n/a,rail_good,2001,E3
Beta,Nowhere,5,rail_good,,E4
",
    );
    let gazetteer = write_fixture(
        &temp_dir,
        "gazetteer.csv",
        "\
Name EN;Province;Lat;Long
CityX;ProvA;0;0
CityY;ProvB;10;10
Lost;ProvC;;
",
    );

    let config = load_config(None).unwrap();
    let stations = load_stations(&stations).unwrap().records;
    let tracks = load_tracks(&tracks).unwrap().records;
    let gazetteer = load_gazetteer(&gazetteer, &config).unwrap().records;
    assert_eq!(stations.len(), 4);
    assert_eq!(gazetteer.len(), 3);

    let attribution = run_attribution(&config, &stations, &gazetteer);
    assert_eq!(attribution.station_count, 3);
    assert_eq!(attribution.duplicate_stations, 1);
    assert_eq!(attribution.excluded_references, 1);
    assert_eq!(attribution.matched, 2);
    assert_eq!(attribution.no_coordinates, 1);

    let s1 = attribution.row("S1").unwrap();
    assert_eq!(s1.status, RowStatus::Matched);
    assert_eq!(s1.matched_reference_name.as_deref(), Some("CityX"));
    assert_eq!(s1.region.as_deref(), Some("ProvA"));
    let d = s1.distance_km.unwrap();
    assert!(d > 0.0 && d < 200.0);
    assert_eq!(attribution.row("S2").unwrap().region.as_deref(), Some("ProvB"));
    assert_eq!(attribution.row("S3").unwrap().status, RowStatus::NoCoordinates);

    // The attribution report survives a save/load cycle.
    let report_path = temp_dir.join("attribution.json");
    save_report(&report_path, &attribution).unwrap();
    let reloaded: AttributionReport = load_report(&report_path).unwrap();
    assert_eq!(reloaded.rows, attribution.rows);

    let merged = merge_regions(&stations, &reloaded);
    assert_eq!(merged[0].region.as_deref(), Some("ProvA"));
    assert_eq!(merged[2].region.as_deref(), Some("OLD"));

    // No station year column: the latest-year default filters nothing.
    let snapshot = select_snapshot(&merged, &tracks, YearSelection::Latest);
    assert_eq!(snapshot.year, None);
    let (build, report) = build_and_analyze(&config, &snapshot, None).unwrap();
    assert_eq!(build.network.station_count(), 3);
    assert_eq!(build.network.track_count(), 3);
    assert_eq!(report.diagnostics.duplicate_station_rows, vec!["S1".to_string()]);
    assert_eq!(report.diagnostics.unresolved_endpoints, vec!["Nowhere".to_string()]);
    assert_eq!(report.diagnostics.missing_length, 1);
    assert_eq!(report.tracks_with_year, 2);
    assert_eq!(report.tracks_without_year, 1);

    assert_eq!(report.connectivity.component_count, 1);
    assert!(report.connectivity.is_connected);
    // Three tracks over three stations: 3 / 3.
    assert!((report.connectivity.density - 1.0).abs() < 1e-12);

    assert_eq!(report.categories, vec!["rail_good", "rail_pass", "road"]);
    assert_eq!(report.regions, vec!["OLD", "ProvA", "ProvB"]);
    assert_eq!(report.stations_with_region, 3);
    assert_eq!(report.filtered.filter, "rail");
    assert_eq!(report.filtered.total, 2);
    // Gamma has no coordinates, so only Alpha-Beta can be drawn.
    assert_eq!(report.filtered.drawable, 1);

    let (_, roads) = build_and_analyze(&config, &snapshot, Some("ROAD")).unwrap();
    assert_eq!(roads.filtered.total, 1);

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn yearly_tables_default_to_latest_snapshot() {
    let temp_dir = std::env::temp_dir().join("rn_app_snapshot_smoke");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let stations = write_fixture(
        &temp_dir,
        "stations.csv",
        "\
station_id,station_name,province,latitude,longitude,year
S1,Alpha,HEBEI,38.0,114.5,2015
S2,Beta,,39.0,116.0,2015
S1,Alpha,HEBEI,38.0,114.5,2020
S2,Beta,BEIJING,39.0,116.0,2020
S3,Gamma,,40.0,117.0,2020.0
",
    );
    let tracks = write_fixture(
        &temp_dir,
        "tracks.csv",
        "\
start_station,end_station,length,type,year,edge_id
Alpha,Beta,280,rail pass,2015,E1
Alpha,Beta,280,rail pass,2020,E2
Beta,Gamma,150,rail good,2020,E3
",
    );

    let config = load_config(None).unwrap();
    let stations = load_stations(&stations).unwrap().records;
    let tracks = load_tracks(&tracks).unwrap().records;

    let latest = select_snapshot(&stations, &tracks, YearSelection::default());
    assert_eq!(latest.year, Some(2020));
    let (build, report) = build_and_analyze(&config, &latest, None).unwrap();
    assert_eq!(report.snapshot_year, Some(2020));
    assert_eq!(build.network.station_count(), 3);
    assert_eq!(build.network.track_count(), 2);
    assert!(report.diagnostics.duplicate_station_rows.is_empty());
    assert_eq!(report.stations_with_region, 2);
    assert!(report.connectivity.is_connected);

    let earlier = select_snapshot(&stations, &tracks, YearSelection::Year(2015));
    let (build, report) = build_and_analyze(&config, &earlier, None).unwrap();
    assert_eq!(build.network.station_count(), 2);
    assert_eq!(build.network.track_count(), 1);
    assert_eq!(report.stations_with_region, 1);

    let all = select_snapshot(&stations, &tracks, YearSelection::All);
    let (build, report) = build_and_analyze(&config, &all, None).unwrap();
    assert_eq!(report.snapshot_year, None);
    assert_eq!(build.network.track_count(), 3);
    assert_eq!(report.diagnostics.duplicate_station_rows.len(), 2);

    let _ = std::fs::remove_dir_all(&temp_dir);
}
