//! Hit detection between shells and planes
//!
//! Shells use a fixed square hitbox independent of their drawn radius.
//! Planes use their full bounding box. Overlap is strict: touching edges
//! do not count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collections::EntityList;
use super::effects::Explosion;
use super::plane::PlanePool;
use super::projectile::Projectile;
use crate::tuning::Tuning;

/// Axis-aligned rectangle (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// A shell that brought down a plane this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the shell in the projectile list
    pub projectile: usize,
    /// Plane slot that went down
    pub slot: usize,
    /// Where the shell was (explosion centre)
    pub pos: Vec2,
}

/// Test every shell against every live plane.
///
/// Each shell downs at most one plane per call: the first live plane in slot
/// order whose box it overlaps. That plane is marked dead, an explosion is
/// spawned at the shell, and the hit reward is added to `score`. Shells are
/// not consumed by a hit.
pub fn resolve_hits(
    projectiles: &EntityList<Projectile>,
    planes: &mut PlanePool,
    explosions: &mut EntityList<Explosion>,
    score: &mut u64,
    tuning: &Tuning,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for (index, shell) in projectiles.iter().enumerate() {
        let hitbox = shell.hitbox(tuning.hitbox_size);
        let target = planes
            .iter()
            .position(|plane| plane.alive && plane.bounds(tuning).intersects(&hitbox));

        if let Some(slot) = target {
            if let Some(plane) = planes.get_mut(slot) {
                plane.alive = false;
            }
            explosions.push(Explosion::new(shell.pos, tuning));
            *score += tuning.hit_reward;
            hits.push(Hit {
                projectile: index,
                slot,
                pos: shell.pos,
            });
        }
    }

    hits
}
