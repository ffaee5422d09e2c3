//! sav-state: snapshot layer for the savestate pipeline
//!
//! Captures live objects into immutable state records, encodes them to
//! a versionable JSON text format, decodes that text strictly, and
//! restores live objects from the result. Per-type custom behavior is
//! injected through the [`StateFactories`] registry.

use thiserror::Error;

pub mod codec;
pub mod creature;
pub mod hitbox;
pub mod power;
pub mod registry;
pub mod relic;

pub use creature::CreatureState;
pub use hitbox::HitboxState;
pub use power::PowerState;
pub use registry::{CaptureFn, DecodeFn, FactoryTable, StateFactories};
pub use relic::RelicState;

/// Snapshot layer errors.
///
/// Parse failures name the offending key so a corrupt record is never
/// silently accepted. An unknown power/relic type id is deliberately
/// not in this taxonomy; it falls back to the generic codec.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required key `{key}`")]
    MissingKey { key: String },

    #[error("key `{key}` is not a {expected}")]
    WrongKind { key: String, expected: &'static str },

    #[error("unknown key `{key}`")]
    UnknownKey { key: String },

    #[error("no relic definition for `{relic_id}`")]
    MissingDefinition { relic_id: String },
}

/// Snapshot that restores by projecting its fields onto a live object
/// the caller already owns.
pub trait Projectable {
    type Live;

    fn project(&self, live: &mut Self::Live);
}

/// Snapshot that restores by constructing a fresh live object from a
/// content catalog.
///
/// Kept distinct from [`Projectable`]: the two contracts have different
/// lifecycle ownership and must not be collapsed into one interface.
pub trait Constructible {
    type Live;
    type Catalog: ?Sized;

    fn construct(&self, catalog: &Self::Catalog) -> Result<Self::Live, StateError>;
}
