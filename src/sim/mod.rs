//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timers run on the simulation clock only
//! - Seeded RNG only
//! - Stable iteration order (append order, plane slot order)
//! - No rendering or platform dependencies

pub mod collections;
pub mod collision;
pub mod effects;
pub mod plane;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collections::{EntityList, Expiring};
pub use collision::{Hit, Rect, resolve_hits};
pub use effects::{Explosion, SmokePuff, TRACER_COLORS, TracerDirection, TracerStreak};
pub use plane::{Plane, PlanePool};
pub use projectile::Projectile;
pub use spawner::PlaneSpawner;
pub use state::{Aim, GameEvent, GamePhase, GameState, NightMode, SuperPower};
pub use tick::{FrameInput, tick};
pub use timer::{Cooldown, Countdown};
