//! sav-core: Live object model at the savestate boundary
//!
//! Minimal definitions of the host's live objects that the snapshot
//! layer captures from and restores onto. The host owns allocation and
//! simulation of these objects; this crate only fixes their public
//! field contract.

pub mod creature;
pub mod geom;
pub mod power;
pub mod relic;

pub use creature::Creature;
pub use geom::Hitbox;
pub use power::Power;
pub use relic::{Relic, RelicCatalog, RelicLibrary};
