//! Power snapshots.

use serde_json::{json, Map, Value};

use sav_core::{Creature, Power};

use crate::codec;
use crate::registry::StateFactories;
use crate::StateError;

const KEYS: &[&str] = &["power_id", "amount", "just_applied"];

/// Immutable snapshot of a single power instance.
///
/// Several snapshots with the same `power_id` may appear in one
/// creature's power list; they are told apart by position, and list
/// order must survive every pipeline stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PowerState {
    pub power_id: String,
    pub amount: i32,
    pub just_applied: bool,

    /// Custom-variant fields, filled in by registered capture/decode
    /// overrides. Empty in the generic path; merged into the encoded
    /// record after the common keys.
    pub extra: Map<String, Value>,
}

impl PowerState {
    /// Generic capture of the common field set.
    pub fn capture(power: &Power) -> Self {
        Self {
            power_id: power.power_id.clone(),
            amount: power.amount,
            just_applied: power.just_applied,
            extra: Map::new(),
        }
    }

    /// Registry-aware capture, dispatching on the power's type id.
    pub fn for_power(power: &Power, factories: &StateFactories) -> Self {
        match factories.powers.capture_override(&power.power_id) {
            Some(capture) => capture(power),
            None => Self::capture(power),
        }
    }

    /// Generic strict decode of the common field set.
    pub fn decode(value: &Value) -> Result<Self, StateError> {
        let obj = codec::as_record(value)?;
        codec::reject_unknown(obj, KEYS)?;
        Ok(Self {
            power_id: codec::get_str(obj, "power_id")?,
            amount: codec::get_i32(obj, "amount")?,
            just_applied: codec::get_bool(obj, "just_applied")?,
            extra: Map::new(),
        })
    }

    /// Registry-aware decode. An id without a registered decoder — an
    /// unknown type included — falls back to [`PowerState::decode`].
    pub fn for_record(value: &Value, factories: &StateFactories) -> Result<Self, StateError> {
        let obj = codec::as_record(value)?;
        let power_id = codec::get_str(obj, "power_id")?;
        match factories.powers.decode_override(&power_id) {
            Some(decode) => decode(value),
            None => Self::decode(value),
        }
    }

    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("power_id".into(), json!(self.power_id));
        record.insert("amount".into(), json!(self.amount));
        record.insert("just_applied".into(), json!(self.just_applied));
        for (key, value) in &self.extra {
            record.insert(key.clone(), value.clone());
        }
        Value::Object(record)
    }

    /// Reduced record carrying only gameplay-equivalence fields.
    /// `just_applied` is transient presentation state and is left out.
    pub fn diff_record(&self) -> Value {
        json!({
            "power_id": self.power_id,
            "amount": self.amount,
        })
    }

    /// Rebuild a live power bound to its new owner.
    pub fn restore(&self, owner: &Creature) -> Power {
        Power {
            power_id: self.power_id.clone(),
            amount: self.amount,
            just_applied: self.just_applied,
            owner: owner.id.clone(),
        }
    }
}
