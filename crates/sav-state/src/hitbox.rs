//! Hitbox snapshots.

use serde_json::{json, Value};

use sav_core::Hitbox;

use crate::codec;
use crate::StateError;

const KEYS: &[&str] = &["x", "y", "width", "height"];

/// Immutable snapshot of a single bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitboxState {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HitboxState {
    pub fn capture(hb: &Hitbox) -> Self {
        Self {
            x: hb.x,
            y: hb.y,
            width: hb.width,
            height: hb.height,
        }
    }

    pub fn to_record(&self) -> Value {
        json!({
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
        })
    }

    pub fn decode(value: &Value) -> Result<Self, StateError> {
        let obj = codec::as_record(value)?;
        codec::reject_unknown(obj, KEYS)?;
        Ok(Self {
            x: codec::get_f32(obj, "x")?,
            y: codec::get_f32(obj, "y")?,
            width: codec::get_f32(obj, "width")?,
            height: codec::get_f32(obj, "height")?,
        })
    }

    /// Rebuild a live hitbox. Creature restore does not call this; the
    /// host recomputes layout geometry after load.
    pub fn restore(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }
}
