use std::collections::BTreeSet;

use crate::primitive::PrimitiveId;

/// Tracks the live primitives of one scene during script construction.
///
/// A primitive becomes live when an introducing operation (create, fade-in,
/// write) first targets it, and leaves the live set when a retiring
/// operation (fade-out) targets it. Mutating operations require a live
/// target, and a scene whose live set is non-empty at the end of its
/// script fails validation.
///
/// Backed by a BTreeSet so leak reports list ids in a stable order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    live: BTreeSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the live set. Returns false if it was already live.
    pub fn register(&mut self, id: &PrimitiveId) -> bool {
        self.live.insert(id.0.clone())
    }

    /// Remove a primitive from the live set. Returns false if it was not live.
    pub fn retire(&mut self, id: &PrimitiveId) -> bool {
        self.live.remove(&id.0)
    }

    pub fn is_live(&self, id: &PrimitiveId) -> bool {
        self.live.contains(&id.0)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Ids of all live primitives, sorted.
    pub fn live_ids(&self) -> Vec<String> {
        self.live.iter().cloned().collect()
    }
}
