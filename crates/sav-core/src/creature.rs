//! Creature instances — players and non-player actors in the
//! simulation.

use serde::{Deserialize, Serialize};

use crate::geom::Hitbox;
use crate::power::Power;

/// A live participant in the simulation.
///
/// Every field here is part of the public contract consumed by the
/// snapshot layer: capture reads them directly and restore writes them
/// back. The host owns allocation and the update loop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,

    /// Stable content id; `None` for ephemeral constructs that are
    /// never resolved against the content tables.
    pub id: Option<String>,

    pub is_player: bool,

    /// Below half health.
    pub is_bloodied: bool,

    // Draw position and dialog anchor.
    pub draw_x: f32,
    pub draw_y: f32,
    pub dialog_x: f32,
    pub dialog_y: f32,

    pub gold: i32,
    /// Gold shown by the counting-up animation; trails `gold`.
    pub display_gold: i32,

    pub is_dying: bool,
    pub is_dead: bool,
    /// Downed but not yet removed (multi-phase encounters).
    pub half_dead: bool,

    pub flip_horizontal: bool,
    pub flip_vertical: bool,

    pub escape_timer: f32,
    pub is_escaping: bool,

    pub last_damage_taken: i32,

    // Health-bar layout scalars.
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

    /// Body hitbox.
    pub hb: Hitbox,
    /// Health-bar hitbox.
    pub health_hb: Hitbox,

    /// Active powers, in application order.
    pub powers: Vec<Power>,
}

impl Creature {
    /// Creature at full health with no powers, at the origin.
    pub fn new(name: impl Into<String>, max_health: i32) -> Self {
        Self {
            name: name.into(),
            current_health: max_health,
            max_health,
            ..Default::default()
        }
    }
}
