//! rn-geo: nearest-reference attribution on the sphere.
//!
//! Provides:
//! - Great-circle (haversine) distance in kilometers
//! - Nearest-reference search with stable tie-breaking
//! - Summary statistics over matched distances
//!
//! # Example
//!
//! ```
//! use rn_geo::{GeoPoint, QueryPoint, ReferencePoint, assign};
//!
//! let refs = vec![
//!     ReferencePoint::new("CityX", "ProvA", Some(0.0), Some(0.0)),
//!     ReferencePoint::new("CityY", "ProvB", Some(10.0), Some(10.0)),
//! ];
//! let queries = vec![QueryPoint::new("S1", Some(1.0), Some(1.0))];
//!
//! let result = assign(&queries, &refs);
//! let m = result.matches[0].matched().unwrap();
//! assert_eq!(m.reference_name, "CityX");
//! assert_eq!(m.category, "ProvA");
//! ```

pub mod haversine;
pub mod nearest;
pub mod summary;

pub use haversine::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use nearest::{
    Assignment, AttributionStatus, MatchResult, NearestMatch, QueryPoint, ReferencePoint, assign,
    assign_sequential,
};
pub use summary::{CategoryCount, DistanceSummary, category_distribution};
