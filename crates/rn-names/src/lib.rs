//! rn-names: station identity reconciliation for railnet.
//!
//! Provides:
//! - Canonical matching keys for raw station labels
//! - A canonical-key index over one record set, with collision reporting
//!
//! # Example
//!
//! ```
//! use rn_names::{Canonicalizer, EntityIndex};
//!
//! let canon = Canonicalizer::default();
//! let index = EntityIndex::build(&canon, [("S1", Some("Beijing  Rail."))]);
//!
//! assert_eq!(index.lookup(&canon, Some("beijing rail")), Some("S1"));
//! ```

pub mod canonical;
pub mod index;

pub use canonical::{
    CanonicalKey, Canonicalizer, DEFAULT_STRIP_CHARS, normalized_strip_char,
};
pub use index::{Collision, EntityIndex};
