//! Great-circle distance on a spherical earth.

use rn_core::Real;

/// Mean earth radius used for every distance in this crate.
pub const EARTH_RADIUS_KM: Real = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: Real,
    pub lon: Real,
}

impl GeoPoint {
    pub fn new(lat: Real, lon: Real) -> Self {
        Self { lat, lon }
    }

    /// Build a point only when both coordinates are present and finite.
    pub fn from_parts(lat: Option<Real>, lon: Option<Real>) -> Option<Self> {
        match (rn_core::finite(lat), rn_core::finite(lon)) {
            (Some(lat), Some(lon)) => Some(Self { lat, lon }),
            _ => None,
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> Real {
        haversine_km(*self, *other)
    }
}

/// Haversine distance between two points, in kilometers.
///
/// Uses the half-angle form, which stays accurate both for tiny separations and
/// near-antipodal pairs. The inner term is clamped to `[0, 1]` because rounding
/// can push it just past 1 for antipodes.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> Real {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().asin()
}
