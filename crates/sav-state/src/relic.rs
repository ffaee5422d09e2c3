//! Relic snapshots.
//!
//! Relics restore by construction: the snapshot looks its definition up
//! in the content catalog, deep-copies it, and overlays the saved
//! per-run state. Contrast with creatures, which project onto a live
//! object the caller already owns.

use serde_json::{json, Map, Value};

use sav_core::{Relic, RelicCatalog};

use crate::codec;
use crate::registry::StateFactories;
use crate::{Constructible, StateError};

const KEYS: &[&str] = &["relic_id", "counter", "grayscale", "pulse"];

/// Immutable snapshot of a single relic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelicState {
    pub relic_id: String,
    pub counter: i32,
    pub grayscale: bool,
    pub pulse: bool,

    /// Custom-variant fields; empty in the generic path.
    pub extra: Map<String, Value>,
}

impl RelicState {
    /// Generic capture of the common field set.
    pub fn capture(relic: &Relic) -> Self {
        Self {
            relic_id: relic.relic_id.clone(),
            counter: relic.counter,
            grayscale: relic.grayscale,
            pulse: relic.pulse,
            extra: Map::new(),
        }
    }

    /// Registry-aware capture, dispatching on the relic's id.
    pub fn for_relic(relic: &Relic, factories: &StateFactories) -> Self {
        match factories.relics.capture_override(&relic.relic_id) {
            Some(capture) => capture(relic),
            None => Self::capture(relic),
        }
    }

    /// Generic strict decode of the common field set.
    pub fn decode(value: &Value) -> Result<Self, StateError> {
        let obj = codec::as_record(value)?;
        codec::reject_unknown(obj, KEYS)?;
        Ok(Self {
            relic_id: codec::get_str(obj, "relic_id")?,
            counter: codec::get_i32(obj, "counter")?,
            grayscale: codec::get_bool(obj, "grayscale")?,
            pulse: codec::get_bool(obj, "pulse")?,
            extra: Map::new(),
        })
    }

    /// Registry-aware decode of a standalone relic record.
    pub fn for_record(value: &Value, factories: &StateFactories) -> Result<Self, StateError> {
        let obj = codec::as_record(value)?;
        let relic_id = codec::get_str(obj, "relic_id")?;
        match factories.relics.decode_override(&relic_id) {
            Some(decode) => decode(value),
            None => Self::decode(value),
        }
    }

    /// Registry-aware decode from text.
    pub fn from_text(text: &str, factories: &StateFactories) -> Result<Self, StateError> {
        let value: Value = serde_json::from_str(text)?;
        Self::for_record(&value, factories)
    }

    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("relic_id".into(), json!(self.relic_id));
        record.insert("counter".into(), json!(self.counter));
        record.insert("grayscale".into(), json!(self.grayscale));
        record.insert("pulse".into(), json!(self.pulse));
        for (key, value) in &self.extra {
            record.insert(key.clone(), value.clone());
        }
        Value::Object(record)
    }

    pub fn encode(&self) -> String {
        self.to_record().to_string()
    }

    /// Construct a fresh live relic: catalog definition, deep-copied,
    /// with the saved per-run state overlaid. A catalog miss is a hard
    /// failure; proceeding without the definition would corrupt the
    /// live object graph.
    pub fn restore(&self, catalog: &dyn RelicCatalog) -> Result<Relic, StateError> {
        let definition =
            catalog
                .definition(&self.relic_id)
                .ok_or_else(|| StateError::MissingDefinition {
                    relic_id: self.relic_id.clone(),
                })?;

        let mut relic = definition.clone();
        relic.counter = self.counter;
        relic.grayscale = self.grayscale;
        relic.pulse = self.pulse;
        Ok(relic)
    }
}

impl Constructible for RelicState {
    type Live = Relic;
    type Catalog = dyn RelicCatalog;

    fn construct(&self, catalog: &Self::Catalog) -> Result<Relic, StateError> {
        self.restore(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sav_core::RelicLibrary;

    fn library() -> RelicLibrary {
        let mut library = RelicLibrary::new();
        library.add(Relic::new("Nunchaku", "Nunchaku"));
        library
    }

    #[test]
    fn encode_decode_round_trip() {
        let factories = StateFactories::new();
        let state = RelicState {
            relic_id: "Nunchaku".into(),
            counter: 7,
            grayscale: false,
            pulse: true,
            extra: Map::new(),
        };

        let decoded = RelicState::from_text(&state.encode(), &factories).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn restore_constructs_from_catalog() {
        let mut relic = Relic::new("Nunchaku", "Nunchaku");
        relic.counter = 9;
        relic.pulse = true;

        let state = RelicState::capture(&relic);
        let restored = state.restore(&library()).unwrap();

        // Definition content comes from the catalog copy, per-run state
        // from the snapshot.
        assert_eq!(restored.name, "Nunchaku");
        assert_eq!(restored.counter, 9);
        assert!(restored.pulse);
        assert!(!restored.grayscale);
    }

    #[test]
    fn restore_fails_on_catalog_miss() {
        let state = RelicState {
            relic_id: "GhostRelic".into(),
            ..RelicState::default()
        };
        match state.restore(&library()) {
            Err(StateError::MissingDefinition { relic_id }) => {
                assert_eq!(relic_id, "GhostRelic");
            }
            other => panic!("expected MissingDefinition, got {other:?}"),
        }
    }

    #[test]
    fn missing_counter_fails() {
        let factories = StateFactories::new();
        let text = r#"{"relic_id": "Nunchaku", "grayscale": false, "pulse": false}"#;
        match RelicState::from_text(text, &factories) {
            Err(StateError::MissingKey { key }) => assert_eq!(key, "counter"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn registered_relic_capture_overrides_generic() {
        let mut factories = StateFactories::new();
        factories.relics.register("Omamori", |relic: &Relic| {
            let mut state = RelicState::capture(relic);
            state.extra.insert("uses_left".into(), json!(2));
            state
        });

        let state = RelicState::for_relic(&Relic::new("Omamori", "Omamori"), &factories);
        assert_eq!(state.extra["uses_left"], json!(2));

        let generic = RelicState::for_relic(&Relic::new("Anchor", "Anchor"), &factories);
        assert!(generic.extra.is_empty());
    }
}
