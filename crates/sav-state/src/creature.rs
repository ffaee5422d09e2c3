//! Creature snapshots.
//!
//! The full record captures everything on the live creature, including
//! presentation fields, so a save is complete; only `current_health`
//! and `current_block` are load-bearing for equivalence checks (see
//! the sav-compare crate).

use serde_json::{json, Value};

use sav_core::{Creature, Power};

use crate::codec;
use crate::hitbox::HitboxState;
use crate::power::PowerState;
use crate::registry::StateFactories;
use crate::{Projectable, StateError};

const KEYS: &[&str] = &[
    "name",
    "id",
    "is_player",
    "is_bloodied",
    "draw_x",
    "draw_y",
    "dialog_x",
    "dialog_y",
    "gold",
    "display_gold",
    "is_dying",
    "is_dead",
    "half_dead",
    "flip_horizontal",
    "flip_vertical",
    "escape_timer",
    "is_escaping",
    "last_damage_taken",
    "hb_x",
    "hb_y",
    "hb_w",
    "hb_h",
    "current_health",
    "max_health",
    "current_block",
    "hb_alpha",
    "anim_x",
    "anim_y",
    "reticle_alpha",
    "reticle_rendered",
    "hb",
    "health_hb",
    "powers",
];

/// Immutable snapshot of one creature.
///
/// Constructed once per capture or decode, consumed by a single
/// [`CreatureState::restore_into`] call that projects it onto a
/// caller-owned live creature.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureState {
    pub name: String,
    /// `None` for ephemeral constructs; preserved as JSON null.
    pub id: Option<String>,

    pub is_player: bool,
    pub is_bloodied: bool,
    pub draw_x: f32,
    pub draw_y: f32,
    pub dialog_x: f32,
    pub dialog_y: f32,

    pub gold: i32,
    pub display_gold: i32,
    pub is_dying: bool,
    pub is_dead: bool,
    pub half_dead: bool,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub escape_timer: f32,
    pub is_escaping: bool,
    pub last_damage_taken: i32,
    pub hb_x: f32,
    pub hb_y: f32,
    pub hb_w: f32,
    pub hb_h: f32,
    pub current_health: i32,
    pub max_health: i32,
    pub current_block: i32,
    pub hb_alpha: f32,

    pub anim_x: f32,
    pub anim_y: f32,
    pub reticle_alpha: f32,
    pub reticle_rendered: bool,

    pub hb: HitboxState,
    pub health_hb: HitboxState,

    /// Power snapshots in the live creature's application order.
    pub powers: Vec<PowerState>,
}

impl CreatureState {
    /// Capture a live creature. Never mutates it; total over any
    /// well-formed live object.
    pub fn capture(creature: &Creature, factories: &StateFactories) -> Self {
        Self {
            name: creature.name.clone(),
            id: creature.id.clone(),
            powers: creature
                .powers
                .iter()
                .map(|power| PowerState::for_power(power, factories))
                .collect(),
            is_player: creature.is_player,
            is_bloodied: creature.is_bloodied,
            draw_x: creature.draw_x,
            draw_y: creature.draw_y,
            dialog_x: creature.dialog_x,
            dialog_y: creature.dialog_y,
            hb: HitboxState::capture(&creature.hb),
            health_hb: HitboxState::capture(&creature.health_hb),
            gold: creature.gold,
            display_gold: creature.display_gold,
            is_dying: creature.is_dying,
            is_dead: creature.is_dead,
            half_dead: creature.half_dead,
            flip_horizontal: creature.flip_horizontal,
            flip_vertical: creature.flip_vertical,
            escape_timer: creature.escape_timer,
            is_escaping: creature.is_escaping,
            last_damage_taken: creature.last_damage_taken,
            hb_x: creature.hb_x,
            hb_y: creature.hb_y,
            hb_w: creature.hb_w,
            hb_h: creature.hb_h,
            current_health: creature.current_health,
            max_health: creature.max_health,
            current_block: creature.current_block,
            hb_alpha: creature.hb_alpha,
            anim_x: creature.anim_x,
            anim_y: creature.anim_y,
            reticle_alpha: creature.reticle_alpha,
            reticle_rendered: creature.reticle_rendered,
        }
    }

    /// Strict decode of the full record. Powers decode through the
    /// registry, preserving array order.
    pub fn decode(text: &str, factories: &StateFactories) -> Result<Self, StateError> {
        let obj = codec::parse_record(text)?;
        codec::reject_unknown(&obj, KEYS)?;

        let powers = codec::get_array(&obj, "powers")?
            .iter()
            .map(|value| PowerState::for_record(value, factories))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: codec::get_str(&obj, "name")?,
            id: codec::get_opt_str(&obj, "id")?,
            is_player: codec::get_bool(&obj, "is_player")?,
            is_bloodied: codec::get_bool(&obj, "is_bloodied")?,
            draw_x: codec::get_f32(&obj, "draw_x")?,
            draw_y: codec::get_f32(&obj, "draw_y")?,
            dialog_x: codec::get_f32(&obj, "dialog_x")?,
            dialog_y: codec::get_f32(&obj, "dialog_y")?,
            gold: codec::get_i32(&obj, "gold")?,
            display_gold: codec::get_i32(&obj, "display_gold")?,
            is_dying: codec::get_bool(&obj, "is_dying")?,
            is_dead: codec::get_bool(&obj, "is_dead")?,
            half_dead: codec::get_bool(&obj, "half_dead")?,
            flip_horizontal: codec::get_bool(&obj, "flip_horizontal")?,
            flip_vertical: codec::get_bool(&obj, "flip_vertical")?,
            escape_timer: codec::get_f32(&obj, "escape_timer")?,
            is_escaping: codec::get_bool(&obj, "is_escaping")?,
            last_damage_taken: codec::get_i32(&obj, "last_damage_taken")?,
            hb_x: codec::get_f32(&obj, "hb_x")?,
            hb_y: codec::get_f32(&obj, "hb_y")?,
            hb_w: codec::get_f32(&obj, "hb_w")?,
            hb_h: codec::get_f32(&obj, "hb_h")?,
            current_health: codec::get_i32(&obj, "current_health")?,
            max_health: codec::get_i32(&obj, "max_health")?,
            current_block: codec::get_i32(&obj, "current_block")?,
            hb_alpha: codec::get_f32(&obj, "hb_alpha")?,
            anim_x: codec::get_f32(&obj, "anim_x")?,
            anim_y: codec::get_f32(&obj, "anim_y")?,
            reticle_alpha: codec::get_f32(&obj, "reticle_alpha")?,
            reticle_rendered: codec::get_bool(&obj, "reticle_rendered")?,
            hb: HitboxState::decode(codec::get_value(&obj, "hb")?)?,
            health_hb: HitboxState::decode(codec::get_value(&obj, "health_hb")?)?,
            powers,
        })
    }

    fn to_record(&self) -> Value {
        json!({
            "name": self.name,
            "id": self.id,
            "is_player": self.is_player,
            "is_bloodied": self.is_bloodied,
            "draw_x": self.draw_x,
            "draw_y": self.draw_y,
            "dialog_x": self.dialog_x,
            "dialog_y": self.dialog_y,
            "gold": self.gold,
            "display_gold": self.display_gold,
            "is_dying": self.is_dying,
            "is_dead": self.is_dead,
            "half_dead": self.half_dead,
            "flip_horizontal": self.flip_horizontal,
            "flip_vertical": self.flip_vertical,
            "escape_timer": self.escape_timer,
            "is_escaping": self.is_escaping,
            "last_damage_taken": self.last_damage_taken,
            "hb_x": self.hb_x,
            "hb_y": self.hb_y,
            "hb_w": self.hb_w,
            "hb_h": self.hb_h,
            "current_health": self.current_health,
            "max_health": self.max_health,
            "current_block": self.current_block,
            "hb_alpha": self.hb_alpha,
            "anim_x": self.anim_x,
            "anim_y": self.anim_y,
            "reticle_alpha": self.reticle_alpha,
            "reticle_rendered": self.reticle_rendered,
            "hb": self.hb.to_record(),
            "health_hb": self.health_hb.to_record(),
            "powers": self.powers.iter().map(PowerState::to_record).collect::<Vec<_>>(),
        })
    }

    /// Encode the full record as self-contained text.
    pub fn encode(&self) -> String {
        self.to_record().to_string()
    }

    /// Encode the reduced record used by the consistency check:
    /// name, health, block, and the per-power diff records. A distinct
    /// operation from [`CreatureState::encode`], not a subset view.
    pub fn diff_encode(&self) -> String {
        json!({
            "name": self.name,
            "current_health": self.current_health,
            "current_block": self.current_block,
            "powers": self.powers.iter().map(PowerState::diff_record).collect::<Vec<_>>(),
        })
        .to_string()
    }

    /// Project this snapshot onto a caller-owned live creature.
    ///
    /// The power list is replaced wholesale with powers rebound to the
    /// new owner. The `hb`/`health_hb` sub-records are deliberately not
    /// applied; the host recomputes layout geometry after load.
    ///
    /// The caller must hold exclusive access to the creature for the
    /// duration of the call (quiescent point between simulation steps).
    pub fn restore_into(&self, creature: &mut Creature) {
        creature.name = self.name.clone();
        creature.id = self.id.clone();

        let powers: Vec<Power> = self
            .powers
            .iter()
            .map(|state| state.restore(creature))
            .collect();
        creature.powers = powers;

        creature.is_player = self.is_player;
        creature.is_bloodied = self.is_bloodied;
        creature.draw_x = self.draw_x;
        creature.draw_y = self.draw_y;
        creature.dialog_x = self.dialog_x;
        creature.dialog_y = self.dialog_y;

        creature.gold = self.gold;
        creature.display_gold = self.display_gold;
        creature.is_dying = self.is_dying;
        creature.is_dead = self.is_dead;
        creature.half_dead = self.half_dead;
        creature.flip_horizontal = self.flip_horizontal;
        creature.flip_vertical = self.flip_vertical;
        creature.escape_timer = self.escape_timer;
        creature.is_escaping = self.is_escaping;
        creature.last_damage_taken = self.last_damage_taken;
        creature.hb_x = self.hb_x;
        creature.hb_y = self.hb_y;
        creature.hb_w = self.hb_w;
        creature.hb_h = self.hb_h;
        creature.current_health = self.current_health;
        creature.max_health = self.max_health;
        creature.current_block = self.current_block;
        creature.hb_alpha = self.hb_alpha;
        creature.anim_x = self.anim_x;
        creature.anim_y = self.anim_y;
        creature.reticle_alpha = self.reticle_alpha;
        creature.reticle_rendered = self.reticle_rendered;
    }
}

impl Projectable for CreatureState {
    type Live = Creature;

    fn project(&self, live: &mut Creature) {
        self.restore_into(live);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sav_core::Hitbox;

    fn scout() -> Creature {
        let mut creature = Creature::new("Scout", 42);
        creature.id = Some("Scout".into());
        creature.current_block = 3;
        creature.gold = 15;
        creature.draw_x = 120.0;
        creature.draw_y = 64.5;
        creature.hb_x = 100.0;
        creature.hb_h = 120.0;
        creature.hb = Hitbox::new(100.0, 50.0, 80.0, 120.0);
        creature.health_hb = Hitbox::new(100.0, 40.0, 80.0, 16.0);
        creature.powers.push(Power::new("Weak", 2));
        creature.powers.push(Power::new("Strength", 1));
        creature
    }

    #[test]
    fn capture_encode_decode_round_trip() {
        let factories = StateFactories::new();
        let state = CreatureState::capture(&scout(), &factories);

        let decoded = CreatureState::decode(&state.encode(), &factories).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn null_id_round_trips() {
        let factories = StateFactories::new();
        let mut creature = scout();
        creature.id = None;

        let state = CreatureState::capture(&creature, &factories);
        let decoded = CreatureState::decode(&state.encode(), &factories).unwrap();
        assert_eq!(decoded.id, None);
    }

    #[test]
    fn power_order_preserved_with_repeated_ids() {
        let factories = StateFactories::new();
        let mut creature = scout();
        creature.powers = vec![
            Power::new("Weak", 1),
            Power::new("Strength", 4),
            Power::new("Weak", 2),
        ];

        let state = CreatureState::capture(&creature, &factories);
        let decoded = CreatureState::decode(&state.encode(), &factories).unwrap();

        let ids: Vec<(&str, i32)> = decoded
            .powers
            .iter()
            .map(|p| (p.power_id.as_str(), p.amount))
            .collect();
        assert_eq!(ids, vec![("Weak", 1), ("Strength", 4), ("Weak", 2)]);
    }

    #[test]
    fn missing_current_health_fails_loudly() {
        let factories = StateFactories::new();
        let state = CreatureState::capture(&scout(), &factories);

        let mut record = codec::parse_record(&state.encode()).unwrap();
        record.remove("current_health");
        let text = Value::Object(record).to_string();

        match CreatureState::decode(&text, &factories) {
            Err(StateError::MissingKey { key }) => assert_eq!(key, "current_health"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn unknown_top_level_key_fails_loudly() {
        let factories = StateFactories::new();
        let state = CreatureState::capture(&scout(), &factories);

        let mut record = codec::parse_record(&state.encode()).unwrap();
        record.insert("mana".into(), json!(10));
        let text = Value::Object(record).to_string();

        match CreatureState::decode(&text, &factories) {
            Err(StateError::UnknownKey { key }) => assert_eq!(key, "mana"),
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn restore_projects_and_rebinds_powers() {
        let factories = StateFactories::new();
        let state = CreatureState::capture(&scout(), &factories);

        let mut target = Creature::new("placeholder", 1);
        target.hb = Hitbox::new(1.0, 2.0, 3.0, 4.0);
        state.restore_into(&mut target);

        assert_eq!(target.name, "Scout");
        assert_eq!(target.current_health, 42);
        assert_eq!(target.max_health, 42);
        assert_eq!(target.current_block, 3);
        assert_eq!(target.powers.len(), 2);
        for power in &target.powers {
            assert_eq!(power.owner.as_deref(), Some("Scout"));
        }
        // Scalar layout fields are applied...
        assert_eq!(target.hb_x, 100.0);
        assert_eq!(target.hb_h, 120.0);
        // ...but the hitbox sub-records are not.
        assert_eq!(target.hb, Hitbox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn capture_does_not_mutate_the_live_creature() {
        let factories = StateFactories::new();
        let creature = scout();
        let before = creature.clone();
        let _ = CreatureState::capture(&creature, &factories);
        assert_eq!(creature, before);
    }

    #[test]
    fn diff_encode_is_reduced() {
        let factories = StateFactories::new();
        let state = CreatureState::capture(&scout(), &factories);

        let record = codec::parse_record(&state.diff_encode()).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["current_block", "current_health", "name", "powers"]
        );

        let powers = codec::get_array(&record, "powers").unwrap();
        assert_eq!(powers[0], json!({"power_id": "Weak", "amount": 2}));
    }

    #[test]
    fn registry_override_applies_inside_creature_capture() {
        let mut factories = StateFactories::new();
        factories.powers.register("Weak", |power: &Power| {
            let mut state = PowerState::capture(power);
            state.extra.insert("dampened".into(), json!(true));
            state
        });

        let state = CreatureState::capture(&scout(), &factories);
        assert_eq!(state.powers[0].extra["dampened"], json!(true));
        assert!(state.powers[1].extra.is_empty());
    }
}
