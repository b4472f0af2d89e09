//! Cannon shells
//!
//! Shells fly under gravity. Position integration is scaled by
//! `Tuning::velocity_scale` (10 by default) on top of `vel * dt`, which
//! sets the visual speed of the arc.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collections::Expiring;
use crate::elevation_dir;
use crate::tuning::Tuning;

/// A cannon shell in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Velocity in units/s before the position scale is applied
    pub vel: Vec2,
    /// Recent positions for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Projectile {
    /// Launch from `origin` at `angle_deg` elevation with `power` muzzle speed
    pub fn launch(origin: Vec2, angle_deg: f32, power: f32) -> Self {
        Self {
            pos: origin,
            vel: elevation_dir(angle_deg) * power,
            trail: Vec::new(),
        }
    }

    /// Record current position to trail, dropping the oldest past `max_len`
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.insert(0, self.pos);
        self.trail.truncate(max_len);
    }

    /// Fixed-size collision box centred on the shell
    pub fn hitbox(&self, size: f32) -> super::collision::Rect {
        super::collision::Rect::centered(self.pos, Vec2::splat(size))
    }

    /// Whether the shell has left the playfield (top is open)
    pub fn out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > width || self.pos.y > height
    }
}

impl Expiring for Projectile {
    fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.vel.y += tuning.gravity * dt;
        self.pos += self.vel * dt * tuning.velocity_scale;
        self.record_trail(tuning.trail_length);
    }

    fn is_expired(&self, tuning: &Tuning) -> bool {
        self.out_of_bounds(tuning.screen_width, tuning.screen_height)
    }
}
