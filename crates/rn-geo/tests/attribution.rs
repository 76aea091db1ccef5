//! Integration tests for rn-geo.

use proptest::prelude::*;
use rn_geo::{
    AttributionStatus, DistanceSummary, GeoPoint, QueryPoint, ReferencePoint, assign,
    assign_sequential, haversine_km,
};

#[test]
fn gazetteer_scenario() {
    // CityX at the origin, CityY at (10, 10); query at (1, 1).
    let refs = vec![
        ReferencePoint::new("CityX", "ProvA", Some(0.0), Some(0.0)),
        ReferencePoint::new("CityY", "ProvB", Some(10.0), Some(10.0)),
    ];
    let queries = vec![QueryPoint::new("S1", Some(1.0), Some(1.0))];

    let result = assign(&queries, &refs);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].query_id, "S1");

    let m = result.matches[0].matched().expect("query has coordinates");
    assert_eq!(m.reference_name, "CityX");
    assert_eq!(m.category, "ProvA");

    let to_y = haversine_km(GeoPoint::new(1.0, 1.0), GeoPoint::new(10.0, 10.0));
    assert!(m.distance_km > 0.0 && m.distance_km < to_y);
}

#[test]
fn identical_coordinates_give_zero_and_first_reference() {
    let refs = vec![
        ReferencePoint::new("A", "one", Some(31.2), Some(121.5)),
        ReferencePoint::new("B", "two", Some(31.2), Some(121.5)),
    ];
    let queries = vec![QueryPoint::new("S", Some(31.2), Some(121.5))];

    let result = assign(&queries, &refs);
    let m = result.matches[0].matched().unwrap();
    assert_eq!(m.distance_km, 0.0);
    assert_eq!(m.reference_name, "A");
}

#[test]
fn no_coordinates_never_matches() {
    let refs = vec![ReferencePoint::new("A", "one", Some(0.0), Some(0.0))];
    let queries = vec![QueryPoint::new("S", None, None)];

    let result = assign(&queries, &refs);
    assert_eq!(result.matches[0].status, AttributionStatus::NoCoordinates);
    assert!(DistanceSummary::from_assignment(&result).is_none());
}

fn coord() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        // Coarse grid so that ties actually occur.
        8 => (-20_i32..20).prop_map(|v| Some(v as f64 * 0.5)),
    ]
}

proptest! {
    #[test]
    fn parallel_matches_sequential(
        refs in prop::collection::vec((coord(), coord()), 0..12),
        queries in prop::collection::vec((coord(), coord()), 0..40),
    ) {
        let refs: Vec<ReferencePoint> = refs
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lon))| ReferencePoint::new(format!("R{i}"), format!("C{}", i % 3), lat, lon))
            .collect();
        let queries: Vec<QueryPoint> = queries
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lon))| QueryPoint::new(format!("Q{i}"), lat, lon))
            .collect();

        prop_assert_eq!(assign(&queries, &refs), assign_sequential(&queries, &refs));
    }
}
