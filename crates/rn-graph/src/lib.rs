//! rn-graph: network layer for railnet.
//!
//! Provides:
//! - Core network data structures (Station, Track, Network)
//! - Incremental network builder with validation
//! - Reconciliation of station/track records into a network
//! - Undirected connectivity analysis
//!
//! Tracks are never merged: two tracks between the same stations are two
//! edges, whatever their attributes.
//!
//! # Example
//!
//! ```
//! use rn_graph::{NetworkBuilder, TrackSpec, analyze};
//! use rn_records::StationRecord;
//!
//! let mut builder = NetworkBuilder::new();
//! let a = builder.add_station(&StationRecord::new("S1", "Alpha")).unwrap();
//! let b = builder.add_station(&StationRecord::new("S2", "Beta")).unwrap();
//! builder.add_track(a, b, TrackSpec::new("rail_pass"));
//! builder.add_track(a, b, TrackSpec::new("road"));
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.tracks_between(a, b).count(), 2);
//! assert_eq!(analyze(&network).component_count, 1);
//! ```

pub mod builder;
pub mod connectivity;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod reconcile;
pub(crate) mod validate;

pub use builder::{NetworkBuilder, TrackSpec};
pub use connectivity::{ConnectivityReport, analyze};
pub use error::GraphError;
pub use graph::{BuildYear, CategoryFilter, Network, Station, Track};
pub use indexing::StationCodes;
pub use reconcile::{BuildDiagnostics, NetworkBuild, build_network};
