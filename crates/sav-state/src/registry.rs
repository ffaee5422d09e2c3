//! Per-type snapshot factory registry.
//!
//! Maps a stable type identifier to a custom capture function and an
//! optional custom decode function. Built once during single-threaded
//! startup, passed explicitly to capture/decode call sites, and treated
//! as read-only afterward.

use std::collections::HashMap;

use serde_json::Value;

use sav_core::{Power, Relic};

use crate::power::PowerState;
use crate::relic::RelicState;
use crate::StateError;

/// Captures a snapshot from a live object.
pub type CaptureFn<L, S> = Box<dyn Fn(&L) -> S + Send + Sync>;

/// Decodes a snapshot from its JSON record.
pub type DecodeFn<S> = Box<dyn Fn(&Value) -> Result<S, StateError> + Send + Sync>;

struct Entry<L, S> {
    capture: CaptureFn<L, S>,
    decode: Option<DecodeFn<S>>,
}

/// Type-id-keyed factory table for one variant family.
///
/// Absence of an entry is not an error: callers fall back to the
/// family's generic capture/decode.
pub struct FactoryTable<L, S> {
    entries: HashMap<String, Entry<L, S>>,
}

impl<L, S> FactoryTable<L, S> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a custom capture for `type_id`; decoding stays with the
    /// family's generic decoder. Last writer wins.
    pub fn register(
        &mut self,
        type_id: impl Into<String>,
        capture: impl Fn(&L) -> S + Send + Sync + 'static,
    ) {
        self.entries.insert(
            type_id.into(),
            Entry {
                capture: Box::new(capture),
                decode: None,
            },
        );
    }

    /// Register a custom capture/decode pair for a type that carries
    /// custom fields. Last writer wins.
    pub fn register_with_decode(
        &mut self,
        type_id: impl Into<String>,
        capture: impl Fn(&L) -> S + Send + Sync + 'static,
        decode: impl Fn(&Value) -> Result<S, StateError> + Send + Sync + 'static,
    ) {
        self.entries.insert(
            type_id.into(),
            Entry {
                capture: Box::new(capture),
                decode: Some(Box::new(decode)),
            },
        );
    }

    pub fn capture_override(&self, type_id: &str) -> Option<&CaptureFn<L, S>> {
        self.entries.get(type_id).map(|entry| &entry.capture)
    }

    pub fn decode_override(&self, type_id: &str) -> Option<&DecodeFn<S>> {
        self.entries
            .get(type_id)
            .and_then(|entry| entry.decode.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, S> Default for FactoryTable<L, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of per-type snapshot overrides for every variant family.
#[derive(Default)]
pub struct StateFactories {
    pub powers: FactoryTable<Power, PowerState>,
    pub relics: FactoryTable<Relic, RelicState>,
}

impl StateFactories {
    pub fn new() -> Self {
        Self::default()
    }
}
