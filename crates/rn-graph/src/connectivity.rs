//! Undirected connectivity statistics.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;
use rn_core::Real;
use serde::Serialize;
use tracing::info;

use crate::graph::Network;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivityReport {
    pub vertex_count: usize,
    /// Parallel tracks and self-loops each count once.
    pub edge_count: usize,
    pub component_count: usize,
    pub largest_component_size: usize,
    /// `m / (n(n-1)/2)`; exceeds 1 when parallel tracks are dense enough.
    pub density: Real,
    pub is_connected: bool,
}

/// Connectivity of the network with track direction ignored.
pub fn analyze(network: &Network) -> ConnectivityReport {
    let n = network.station_count();
    let m = network.track_count();

    let mut components = UnionFind::<usize>::new(n);
    for track in network.tracks() {
        components.union(track.source.slot(), track.target.slot());
    }

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for root in components.into_labeling() {
        *sizes.entry(root).or_default() += 1;
    }

    let report = ConnectivityReport {
        vertex_count: n,
        edge_count: m,
        component_count: sizes.len(),
        largest_component_size: sizes.values().copied().max().unwrap_or(0),
        density: density(n, m),
        is_connected: sizes.len() == 1,
    };

    info!(
        vertices = report.vertex_count,
        edges = report.edge_count,
        components = report.component_count,
        largest = report.largest_component_size,
        density = report.density,
        "connectivity analyzed"
    );
    report
}

fn density(n: usize, m: usize) -> Real {
    if n < 2 {
        return 0.0;
    }
    let pairs = n as Real * (n - 1) as Real / 2.0;
    m as Real / pairs
}
