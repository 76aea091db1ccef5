//! Stable mapping between source station identifiers and arena IDs.

use std::collections::HashMap;

use rn_core::StationId;

/// Map from source station codes to [`StationId`]s.
///
/// Codes are registered in arena order, so the n-th registered code gets the
/// station with index n. Registering a code twice keeps the first ID.
#[derive(Debug, Clone, Default)]
pub struct StationCodes {
    by_code: HashMap<String, StationId>,
}

impl StationCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next station's code.
    ///
    /// Returns the new ID, or `Err(existing)` when the code is already taken.
    pub fn register(&mut self, code: &str) -> Result<StationId, StationId> {
        if let Some(&existing) = self.by_code.get(code) {
            return Err(existing);
        }
        let id = StationId::from_index(self.by_code.len() as u32);
        self.by_code.insert(code.to_string(), id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<StationId> {
        self.by_code.get(code).copied()
    }
}
