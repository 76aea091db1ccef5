//! Nearest-reference attribution.
//!
//! Every query point is matched against the full reference set (O(Q·R)).
//! Query points are independent, so [`assign`] spreads them over the rayon
//! pool; the search for one query point is always a sequential scan in
//! reference input order, which keeps the tie-break identical to
//! [`assign_sequential`].

use rayon::prelude::*;
use rn_core::Real;
use tracing::{info, warn};

use crate::haversine::{GeoPoint, haversine_km};

/// A point to attribute, e.g. a station.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPoint {
    pub id: String,
    pub lat: Option<Real>,
    pub lon: Option<Real>,
}

impl QueryPoint {
    pub fn new(id: impl Into<String>, lat: Option<Real>, lon: Option<Real>) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lon)
    }
}

/// A gazetteer entry with the category (region) it represents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferencePoint {
    pub name: String,
    pub category: String,
    pub lat: Option<Real>,
    pub lon: Option<Real>,
}

impl ReferencePoint {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        lat: Option<Real>,
        lon: Option<Real>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            lat,
            lon,
        }
    }

    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lon)
    }
}

/// The reference point nearest to a query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearestMatch {
    /// Position of the matched point in the original reference slice.
    pub reference_index: usize,
    pub reference_name: String,
    /// Copied verbatim from the matched reference point.
    pub category: String,
    pub distance_km: Real,
}

/// Outcome of attributing one query point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "snake_case")
)]
pub enum AttributionStatus {
    Matched(NearestMatch),
    /// The query point lacks a usable latitude/longitude.
    NoCoordinates,
    /// The reference set had no usable points.
    NoReference,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    pub query_id: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub status: AttributionStatus,
}

impl MatchResult {
    pub fn matched(&self) -> Option<&NearestMatch> {
        match &self.status {
            AttributionStatus::Matched(m) => Some(m),
            _ => None,
        }
    }
}

/// Results for a whole query set, in query order, plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    pub matches: Vec<MatchResult>,
    /// Reference points dropped before the search for lacking coordinates.
    pub excluded_references: usize,
    pub no_coordinates: usize,
    pub no_reference: usize,
}

impl Assignment {
    pub fn matched_count(&self) -> usize {
        self.matches.iter().filter(|m| m.matched().is_some()).count()
    }

    /// Distances of every matched query, in query order.
    pub fn distances(&self) -> Vec<Real> {
        self.matches
            .iter()
            .filter_map(|m| m.matched().map(|n| n.distance_km))
            .collect()
    }
}

struct Candidate<'a> {
    index: usize,
    reference: &'a ReferencePoint,
    point: GeoPoint,
}

fn usable_references(references: &[ReferencePoint]) -> Vec<Candidate<'_>> {
    references
        .iter()
        .enumerate()
        .filter_map(|(index, reference)| {
            reference.point().map(|point| Candidate {
                index,
                reference,
                point,
            })
        })
        .collect()
}

fn nearest(query: &QueryPoint, candidates: &[Candidate<'_>]) -> MatchResult {
    let status = match query.point() {
        None => AttributionStatus::NoCoordinates,
        Some(origin) => {
            let mut best: Option<(&Candidate<'_>, Real)> = None;
            for candidate in candidates {
                let d = haversine_km(origin, candidate.point);
                // Strict comparison: the first of several equal distances wins.
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((candidate, d));
                }
            }
            match best {
                Some((c, distance_km)) => AttributionStatus::Matched(NearestMatch {
                    reference_index: c.index,
                    reference_name: c.reference.name.clone(),
                    category: c.reference.category.clone(),
                    distance_km,
                }),
                None => AttributionStatus::NoReference,
            }
        }
    };

    MatchResult {
        query_id: query.id.clone(),
        status,
    }
}

fn finish(matches: Vec<MatchResult>, excluded_references: usize) -> Assignment {
    let mut assignment = Assignment {
        matches,
        excluded_references,
        ..Default::default()
    };
    for m in &assignment.matches {
        match m.status {
            AttributionStatus::NoCoordinates => assignment.no_coordinates += 1,
            AttributionStatus::NoReference => assignment.no_reference += 1,
            AttributionStatus::Matched(_) => {}
        }
    }

    if excluded_references > 0 {
        warn!(
            excluded = excluded_references,
            "reference points without coordinates excluded"
        );
    }
    info!(
        queries = assignment.matches.len(),
        matched = assignment.matched_count(),
        no_coordinates = assignment.no_coordinates,
        no_reference = assignment.no_reference,
        "nearest-reference attribution finished"
    );
    assignment
}

/// Attribute every query point to its nearest reference point, in parallel.
///
/// Output order equals query order, and the result is identical to
/// [`assign_sequential`] for every input.
pub fn assign(queries: &[QueryPoint], references: &[ReferencePoint]) -> Assignment {
    let candidates = usable_references(references);
    let matches: Vec<MatchResult> = queries
        .par_iter()
        .map(|q| nearest(q, &candidates))
        .collect();
    finish(matches, references.len() - candidates.len())
}

/// Single-threaded variant of [`assign`].
pub fn assign_sequential(queries: &[QueryPoint], references: &[ReferencePoint]) -> Assignment {
    let candidates = usable_references(references);
    let matches: Vec<MatchResult> = queries.iter().map(|q| nearest(q, &candidates)).collect();
    finish(matches, references.len() - candidates.len())
}
