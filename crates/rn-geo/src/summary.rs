//! Reporting helpers over an [`Assignment`].

use std::collections::HashMap;

use rn_core::Real;

use crate::nearest::Assignment;

/// Statistics over matched distances, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceSummary {
    pub count: usize,
    pub mean_km: Real,
    pub median_km: Real,
    pub min_km: Real,
    pub max_km: Real,
}

impl DistanceSummary {
    /// Summarize a set of distances; `None` when there are none.
    pub fn from_distances(distances: &[Real]) -> Option<Self> {
        if distances.is_empty() {
            return None;
        }
        let mut sorted = distances.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let median_km = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Some(Self {
            count: n,
            mean_km: sorted.iter().sum::<Real>() / n as Real,
            median_km,
            min_km: sorted[0],
            max_km: sorted[n - 1],
        })
    }

    pub fn from_assignment(assignment: &Assignment) -> Option<Self> {
        Self::from_distances(&assignment.distances())
    }
}

/// Number of query points attributed to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Matched categories with their counts, largest first, ties by name.
pub fn category_distribution(assignment: &Assignment) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in assignment.matches.iter().filter_map(|m| m.matched()) {
        *counts.entry(m.category.as_str()).or_default() += 1;
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
