//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can override them from JSON
//! without touching the simulation. Defaults mirror `crate::consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,

    // === Cannon ===
    pub cannon_x: f32,
    pub cannon_length: f32,
    pub start_angle: f32,
    pub angle_step: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub start_power: f32,
    pub min_power: f32,
    pub max_power: f32,

    // === Projectiles ===
    pub gravity: f32,
    /// Extra multiplier on position integration (visual speed)
    pub velocity_scale: f32,
    pub trail_length: usize,
    pub hitbox_size: f32,

    // === Timers (seconds) ===
    pub shot_cooldown: f32,
    pub night_cooldown: f32,
    pub spawn_interval: f32,
    pub tracer_interval: f32,
    pub super_power_duration: f32,
    /// Plane speed multiplier while the super power is active
    pub slow_factor: f32,

    // === Planes ===
    pub max_planes: usize,
    pub spawn_batch_min: usize,
    pub spawn_batch_max: usize,
    pub plane_speed: f32,
    pub plane_width: f32,
    pub plane_height: f32,
    pub respawn_x_spread: f32,
    pub respawn_top: f32,
    pub respawn_ground_clearance: f32,

    // === Scoring ===
    pub start_hearts: u32,
    pub hit_reward: u64,

    // === Effects ===
    pub explosion_life: f32,
    pub explosion_start_radius: f32,
    pub explosion_max_radius: f32,
    pub smoke_per_shot: usize,
    pub smoke_life: f32,
    pub smoke_rise_speed: f32,
    pub smoke_growth: f32,
    pub smoke_jitter: f32,
    pub tracer_life: f32,
    pub tracer_min_speed: f32,
    pub tracer_max_speed: f32,
    pub tracer_min_drift: f32,
    pub tracer_max_drift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,

            cannon_x: CANNON_X,
            cannon_length: CANNON_LENGTH,
            start_angle: START_ANGLE,
            angle_step: ANGLE_STEP,
            min_angle: MIN_ANGLE,
            max_angle: MAX_ANGLE,
            start_power: START_POWER,
            min_power: MIN_POWER,
            max_power: MAX_POWER,

            gravity: GRAVITY,
            velocity_scale: VELOCITY_SCALE,
            trail_length: TRAIL_LENGTH,
            hitbox_size: HITBOX_SIZE,

            shot_cooldown: SHOT_COOLDOWN,
            night_cooldown: NIGHT_COOLDOWN,
            spawn_interval: SPAWN_INTERVAL,
            tracer_interval: TRACER_INTERVAL,
            super_power_duration: SUPER_POWER_DURATION,
            slow_factor: SLOW_FACTOR,

            max_planes: MAX_PLANES,
            spawn_batch_min: SPAWN_BATCH_MIN,
            spawn_batch_max: SPAWN_BATCH_MAX,
            plane_speed: PLANE_SPEED,
            plane_width: PLANE_WIDTH,
            plane_height: PLANE_HEIGHT,
            respawn_x_spread: RESPAWN_X_SPREAD,
            respawn_top: RESPAWN_TOP,
            respawn_ground_clearance: RESPAWN_GROUND_CLEARANCE,

            start_hearts: START_HEARTS,
            hit_reward: HIT_REWARD,

            explosion_life: EXPLOSION_LIFE,
            explosion_start_radius: EXPLOSION_START_RADIUS,
            explosion_max_radius: EXPLOSION_MAX_RADIUS,
            smoke_per_shot: SMOKE_PER_SHOT,
            smoke_life: SMOKE_LIFE,
            smoke_rise_speed: SMOKE_RISE_SPEED,
            smoke_growth: SMOKE_GROWTH,
            smoke_jitter: SMOKE_JITTER,
            tracer_life: TRACER_LIFE,
            tracer_min_speed: TRACER_MIN_SPEED,
            tracer_max_speed: TRACER_MAX_SPEED,
            tracer_min_drift: TRACER_MIN_DRIFT,
            tracer_max_drift: TRACER_MAX_DRIFT,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize the effective tuning (pretty-printed)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.screen_width <= 0.0 {
            return invalid("screen_width", "must be positive");
        }
        if self.screen_height <= 0.0 {
            return invalid("screen_height", "must be positive");
        }
        if self.ground_height < 0.0 || self.ground_height >= self.screen_height {
            return invalid("ground_height", "must fit inside the screen");
        }
        if self.min_angle > self.max_angle {
            return invalid("min_angle", "must not exceed max_angle");
        }
        if self.min_power > self.max_power {
            return invalid("min_power", "must not exceed max_power");
        }
        if self.trail_length == 0 {
            return invalid("trail_length", "must keep at least one point");
        }
        if self.hitbox_size <= 0.0 {
            return invalid("hitbox_size", "must be positive");
        }
        if self.spawn_batch_min == 0 || self.spawn_batch_min > self.spawn_batch_max {
            return invalid("spawn_batch_min", "must be in 1..=spawn_batch_max");
        }
        if self.plane_width <= 0.0 {
            return invalid("plane_width", "must be positive");
        }
        if self.plane_height <= 0.0 {
            return invalid("plane_height", "must be positive");
        }
        if self.respawn_x_spread < 0.0 {
            return invalid("respawn_x_spread", "must not be negative");
        }
        let (top, bottom) = self.respawn_y_range();
        if top > bottom {
            return invalid("respawn_top", "respawn band is empty");
        }
        if self.start_hearts == 0 {
            return invalid("start_hearts", "must be at least one");
        }
        if self.explosion_life <= 0.0 {
            return invalid("explosion_life", "must be positive");
        }
        if self.smoke_life <= 0.0 {
            return invalid("smoke_life", "must be positive");
        }
        if self.tracer_life <= 0.0 {
            return invalid("tracer_life", "must be positive");
        }
        if self.tracer_min_speed > self.tracer_max_speed {
            return invalid("tracer_min_speed", "must not exceed tracer_max_speed");
        }
        if self.tracer_min_drift > self.tracer_max_drift {
            return invalid("tracer_min_drift", "must not exceed tracer_max_drift");
        }
        if !(0.0..=1.0).contains(&self.slow_factor) {
            return invalid("slow_factor", "must be within 0..=1");
        }
        Ok(())
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn terrain_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Cannon pivot (projectiles and smoke originate here)
    #[inline]
    pub fn cannon_base(&self) -> Vec2 {
        Vec2::new(self.cannon_x, self.terrain_y())
    }

    /// Vertical band planes (re)enter in
    #[inline]
    pub fn respawn_y_range(&self) -> (f32, f32) {
        (
            self.respawn_top,
            self.terrain_y() - self.respawn_ground_clearance,
        )
    }

    /// Horizontal band planes (re)enter in, just past the right edge
    #[inline]
    pub fn respawn_x_range(&self) -> (f32, f32) {
        (self.screen_width, self.screen_width + self.respawn_x_spread)
    }
}
