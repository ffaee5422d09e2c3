//! Relic instances and the content catalog they are resolved from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A relic instance. The id/name pair comes from the content catalog;
/// `counter`, `grayscale` and `pulse` are per-run mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relic {
    /// Content identifier, resolved against the catalog.
    pub relic_id: String,

    /// Display name from the catalog definition.
    pub name: String,

    /// Charge/progress counter; -1 for relics without one.
    pub counter: i32,

    /// Rendered desaturated (used up for the current act/turn).
    pub grayscale: bool,

    /// Pulse animation flag.
    pub pulse: bool,
}

impl Relic {
    pub fn new(relic_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            relic_id: relic_id.into(),
            name: name.into(),
            counter: -1,
            grayscale: false,
            pulse: false,
        }
    }
}

/// Lookup of relic definitions by content id.
///
/// Restoring a relic snapshot clones the definition and overlays the
/// saved per-run state onto the copy.
pub trait RelicCatalog {
    fn definition(&self, relic_id: &str) -> Option<&Relic>;
}

/// In-memory relic catalog keyed by content id.
#[derive(Debug, Clone, Default)]
pub struct RelicLibrary {
    relics: HashMap<String, Relic>,
}

impl RelicLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; last writer wins for duplicate ids.
    pub fn add(&mut self, relic: Relic) {
        self.relics.insert(relic.relic_id.clone(), relic);
    }

    pub fn len(&self) -> usize {
        self.relics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relics.is_empty()
    }
}

impl RelicCatalog for RelicLibrary {
    fn definition(&self, relic_id: &str) -> Option<&Relic> {
        self.relics.get(relic_id)
    }
}
