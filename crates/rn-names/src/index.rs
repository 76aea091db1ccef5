//! Canonical-key index over one record set.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::canonical::{CanonicalKey, Canonicalizer};

/// Two distinct identifiers whose labels canonicalize to the same key.
///
/// The later identifier wins in the index; the displaced one can no longer be
/// reached by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collision {
    pub key: String,
    pub displaced: String,
    pub winner: String,
}

/// Map from canonical key to record identifier.
///
/// Built in one pass. Records whose label canonicalizes to the empty key are
/// counted but never indexed, so they can never match each other.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    by_key: HashMap<CanonicalKey, String>,
    collisions: Vec<Collision>,
    unmatchable: usize,
}

impl EntityIndex {
    /// Index `(identifier, label)` pairs in order.
    pub fn build<I, S, L>(canon: &Canonicalizer, records: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<L>)>,
        S: AsRef<str>,
        L: AsRef<str>,
    {
        let mut index = Self::default();

        for (id, label) in records {
            let id = id.as_ref();
            let key = canon.canonicalize(label.as_ref().map(|l| l.as_ref()));
            if key.is_empty() {
                debug!(id, "label canonicalizes to empty key; not indexed");
                index.unmatchable += 1;
                continue;
            }

            if let Some(previous) = index.by_key.insert(key.clone(), id.to_string()) {
                if previous != id {
                    warn!(
                        key = key.as_str(),
                        displaced = previous.as_str(),
                        winner = id,
                        "canonical name collision"
                    );
                    index.collisions.push(Collision {
                        key: key.into_string(),
                        displaced: previous,
                        winner: id.to_string(),
                    });
                }
            }
        }

        index
    }

    /// Resolve a raw label to an identifier.
    pub fn lookup(&self, canon: &Canonicalizer, raw_label: Option<&str>) -> Option<&str> {
        self.lookup_key(&canon.canonicalize(raw_label))
    }

    /// Resolve an already-canonical key. The empty key never resolves.
    pub fn lookup_key(&self, key: &CanonicalKey) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.by_key.get(key).map(String::as_str)
    }

    /// Number of distinct indexed keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Every collision observed during the build, in order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn collision_count(&self) -> usize {
        self.collisions.len()
    }

    /// Keys affected by at least one collision, deduplicated, first-seen order.
    pub fn collided_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.collisions
            .iter()
            .map(|c| c.key.as_str())
            .filter(|k| seen.insert(*k))
            .collect()
    }

    /// Records skipped because their label had no matchable content.
    pub fn unmatchable_count(&self) -> usize {
        self.unmatchable
    }
}
