//! Power instances — named, stackable effects attached to a creature.

use serde::{Deserialize, Serialize};

/// A single power instance. Several instances with the same `power_id`
/// may sit on one creature; order within the owner's power list is
/// significant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Power {
    /// Content identifier, resolved against the host's power table.
    pub power_id: String,

    /// Stack count (turns, charges, or strength, per power).
    pub amount: i32,

    /// Applied this turn; drives the flash animation.
    pub just_applied: bool,

    /// Stable id of the owning creature, rebound on restore.
    pub owner: Option<String>,
}

impl Power {
    pub fn new(power_id: impl Into<String>, amount: i32) -> Self {
        Self {
            power_id: power_id.into(),
            amount,
            just_applied: false,
            owner: None,
        }
    }
}
