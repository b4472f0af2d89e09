//! Flak Cannon - A single-screen artillery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Renderer-agnostic draw lists and tessellation
//! - `platform`: Clock/input seams and the frame loop driver
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the target frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the loop will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1270.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Cannon pivot sits on the ground line, 100px from the left edge
    pub const CANNON_X: f32 = 100.0;
    pub const CANNON_LENGTH: f32 = 50.0;
    pub const AIM_GUIDE_LENGTH: f32 = 80.0;

    /// Projectile physics (units/s²). Position integration is scaled by
    /// VELOCITY_SCALE on top of vel * dt.
    pub const GRAVITY: f32 = 9.8;
    pub const VELOCITY_SCALE: f32 = 10.0;
    pub const TRAIL_LENGTH: usize = 20;
    pub const HITBOX_SIZE: f32 = 10.0;

    /// Aim limits
    pub const START_ANGLE: f32 = 45.0;
    pub const ANGLE_STEP: f32 = 2.0;
    pub const MIN_ANGLE: f32 = 0.0;
    pub const MAX_ANGLE: f32 = 90.0;
    pub const START_POWER: f32 = 50.0;
    pub const MIN_POWER: f32 = 10.0;
    pub const MAX_POWER: f32 = 100.0;

    /// Cooldowns and durations (seconds)
    pub const SHOT_COOLDOWN: f32 = 0.2;
    pub const NIGHT_COOLDOWN: f32 = 1.0;
    pub const SPAWN_INTERVAL: f32 = 3.0;
    pub const TRACER_INTERVAL: f32 = 0.5;
    pub const SUPER_POWER_DURATION: f32 = 5.0;
    pub const SLOW_FACTOR: f32 = 0.3;

    /// Planes
    pub const MAX_PLANES: usize = 7;
    pub const SPAWN_BATCH_MIN: usize = 1;
    pub const SPAWN_BATCH_MAX: usize = 3;
    pub const PLANE_SPEED: f32 = 120.0;
    pub const PLANE_WIDTH: f32 = 60.0;
    pub const PLANE_HEIGHT: f32 = 30.0;
    /// Respawn x lies in [SCREEN_WIDTH, SCREEN_WIDTH + RESPAWN_X_SPREAD]
    pub const RESPAWN_X_SPREAD: f32 = 200.0;
    /// Respawn y lies in [RESPAWN_TOP, terrain_y - RESPAWN_GROUND_CLEARANCE]
    pub const RESPAWN_TOP: f32 = 50.0;
    pub const RESPAWN_GROUND_CLEARANCE: f32 = 100.0;

    /// Scoring
    pub const START_HEARTS: u32 = 3;
    pub const HIT_REWARD: u64 = 10;

    /// Effects
    pub const EXPLOSION_LIFE: f32 = 0.5;
    pub const EXPLOSION_START_RADIUS: f32 = 10.0;
    pub const EXPLOSION_MAX_RADIUS: f32 = 50.0;
    pub const SMOKE_PER_SHOT: usize = 8;
    pub const SMOKE_LIFE: f32 = 1.0;
    pub const SMOKE_RISE_SPEED: f32 = 20.0;
    pub const SMOKE_GROWTH: f32 = 5.0;
    pub const SMOKE_JITTER: f32 = 5.0;
    pub const TRACER_LIFE: f32 = 0.6;
    pub const TRACER_MIN_SPEED: f32 = 400.0;
    pub const TRACER_MAX_SPEED: f32 = 700.0;
    pub const TRACER_MIN_DRIFT: f32 = 50.0;
    pub const TRACER_MAX_DRIFT: f32 = 80.0;
}

/// Clamp an angle in degrees to the cannon's elevation range
#[inline]
pub fn clamp_angle(degrees: f32, min: f32, max: f32) -> f32 {
    if degrees.is_nan() {
        return min;
    }
    degrees.clamp(min, max)
}

/// Unit vector for an elevation angle in degrees (screen space, y grows down)
#[inline]
pub fn elevation_dir(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Linear fade from 1 at `elapsed = 0` to 0 at `elapsed >= life`
#[inline]
pub fn fade(elapsed: f32, life: f32) -> f32 {
    if life <= 0.0 {
        return 0.0;
    }
    (1.0 - elapsed / life).clamp(0.0, 1.0)
}
