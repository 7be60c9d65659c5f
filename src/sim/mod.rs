//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod movement;
pub mod outcome;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, overlaps};
pub use snapshot::Snapshot;
pub use spawn::{FORMATIONS, Formation};
pub use state::{
    Boss, Bullet, Enemy, EnemyKind, EntityId, GameEvent, GamePhase, GameState, Player, Powerup,
    PowerupKind,
};
pub use tick::{TickInput, tick};
