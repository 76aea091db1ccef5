//! rn-core: shared foundation for railnet.
//!
//! Contains:
//! - numeric (Real + tolerances + lenient field parsing)
//! - ids (compact synthetic IDs for stations and tracks)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
