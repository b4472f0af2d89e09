//! Visual effect entities: explosions, muzzle smoke, background tracer fire
//!
//! None of these affect gameplay; they only live long enough to be drawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collections::Expiring;
use crate::fade;
use crate::tuning::Tuning;

/// Expanding fireball left where a shell hit a plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub elapsed: f32,
    pub finished: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.explosion_start_radius,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Opacity (1 → 0 over the lifetime)
    pub fn alpha(&self, tuning: &Tuning) -> f32 {
        fade(self.elapsed, tuning.explosion_life)
    }
}

impl Expiring for Explosion {
    fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.elapsed += dt;
        if self.elapsed >= tuning.explosion_life {
            self.finished = true;
        } else {
            let growth = tuning.explosion_max_radius - tuning.explosion_start_radius;
            self.radius =
                tuning.explosion_start_radius + growth * (self.elapsed / tuning.explosion_life);
        }
    }

    fn is_expired(&self, _tuning: &Tuning) -> bool {
        self.finished
    }
}

/// One puff of muzzle smoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokePuff {
    pub pos: Vec2,
    pub radius: f32,
    pub elapsed: f32,
    /// Opacity, 1 at spawn
    pub alpha: f32,
}

impl SmokePuff {
    /// Spawn near `origin` with a small random offset and size
    pub fn new<R: Rng>(origin: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let jitter = tuning.smoke_jitter;
        let offset = if jitter > 0.0 {
            Vec2::new(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            )
        } else {
            Vec2::ZERO
        };
        Self {
            pos: origin + offset,
            radius: rng.random_range(5..=10) as f32,
            elapsed: 0.0,
            alpha: 1.0,
        }
    }

    /// A full muzzle blast worth of puffs
    pub fn burst<R: Rng>(origin: Vec2, tuning: &Tuning, rng: &mut R) -> Vec<Self> {
        (0..tuning.smoke_per_shot)
            .map(|_| Self::new(origin, tuning, rng))
            .collect()
    }
}

impl Expiring for SmokePuff {
    fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.elapsed += dt;
        self.pos.y -= tuning.smoke_rise_speed * dt;
        self.alpha = fade(self.elapsed, tuning.smoke_life);
        self.radius += tuning.smoke_growth * dt;
    }

    fn is_expired(&self, tuning: &Tuning) -> bool {
        self.elapsed >= tuning.smoke_life
    }
}

/// Heading of a background tracer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TracerDirection {
    Up,
    Left,
    Right,
}

impl TracerDirection {
    /// Discrete distribution: mostly straight up, some drifting to either side
    pub const WEIGHTS: [(TracerDirection, f32); 3] = [
        (TracerDirection::Up, 0.6),
        (TracerDirection::Left, 0.2),
        (TracerDirection::Right, 0.2),
    ];

    /// Map a uniform roll in [0, 1) onto the weighted table
    pub fn from_roll(roll: f32) -> Self {
        let total: f32 = Self::WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut target = roll.clamp(0.0, 1.0) * total;
        for (direction, weight) in Self::WEIGHTS {
            if target < weight {
                return direction;
            }
            target -= weight;
        }
        Self::WEIGHTS[Self::WEIGHTS.len() - 1].0
    }

    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::from_roll(rng.random::<f32>())
    }
}

/// Number of warm colours a tracer can be drawn in
pub const TRACER_COLORS: u8 = 3;

/// Decorative anti-aircraft streak rising from the ground at night
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracerStreak {
    pub pos: Vec2,
    /// Velocity in units/s; y is always negative (upward)
    pub vel: Vec2,
    pub direction: TracerDirection,
    pub length: f32,
    /// Index into the tracer colour table
    pub color: u8,
    pub elapsed: f32,
    pub alpha: f32,
}

impl TracerStreak {
    /// Launch from a random point on the ground line
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let direction = TracerDirection::sample(rng);
        let drift = rng.random_range(tuning.tracer_min_drift..=tuning.tracer_max_drift);
        let vx = match direction {
            TracerDirection::Up => 0.0,
            TracerDirection::Left => -drift,
            TracerDirection::Right => drift,
        };
        let speed = rng.random_range(tuning.tracer_min_speed..=tuning.tracer_max_speed);

        Self {
            pos: Vec2::new(rng.random_range(0.0..=tuning.screen_width), tuning.terrain_y()),
            vel: Vec2::new(vx, -speed),
            direction,
            length: rng.random_range(10..=20) as f32,
            color: rng.random_range(0..TRACER_COLORS),
            elapsed: 0.0,
            alpha: 1.0,
        }
    }

    /// Whether the streak has fully left the visible area
    pub fn off_screen(&self, width: f32) -> bool {
        self.pos.y + self.length < 0.0
            || self.pos.x < -self.length
            || self.pos.x > width + self.length
    }
}

impl Expiring for TracerStreak {
    fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos += self.vel * dt;
        self.elapsed += dt;
        self.alpha = fade(self.elapsed, tuning.tracer_life);
    }

    fn is_expired(&self, tuning: &Tuning) -> bool {
        self.off_screen(tuning.screen_width) || self.elapsed >= tuning.tracer_life
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_growth_and_finish() {
        let tuning = Tuning::default();
        let mut explosion = Explosion::new(Vec2::new(300.0, 200.0), &tuning);
        assert_eq!(explosion.radius, 10.0);

        explosion.update(0.25, &tuning);
        assert!((explosion.radius - 30.0).abs() < 1e-4);
        assert!((explosion.alpha(&tuning) - 0.5).abs() < 1e-4);
        assert!(!explosion.is_expired(&tuning));

        explosion.update(0.25, &tuning);
        assert!(explosion.finished);
        assert!(explosion.is_expired(&tuning));
        assert!(explosion.radius <= tuning.explosion_max_radius);
        assert_eq!(explosion.alpha(&tuning), 0.0);
    }

    #[test]
    fn test_smoke_rises_grows_and_fades() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let origin = Vec2::new(100.0, 620.0);
        let mut puff = SmokePuff::new(origin, &tuning, &mut rng);

        assert!((puff.pos - origin).abs().max_element() <= tuning.smoke_jitter + 1e-3);
        assert!((5.0..=10.0).contains(&puff.radius));

        let (y0, r0) = (puff.pos.y, puff.radius);
        puff.update(0.5, &tuning);
        assert!((y0 - puff.pos.y - 10.0).abs() < 1e-3);
        assert!((puff.radius - r0 - 2.5).abs() < 1e-4);
        assert!((puff.alpha - 0.5).abs() < 1e-4);
        assert!(!puff.is_expired(&tuning));

        puff.update(0.5, &tuning);
        assert!(puff.is_expired(&tuning));
        assert_eq!(puff.alpha, 0.0);
    }

    #[test]
    fn test_smoke_burst_size() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let burst = SmokePuff::burst(tuning.cannon_base(), &tuning, &mut rng);
        assert_eq!(burst.len(), 8);
    }

    #[test]
    fn test_tracer_direction_table() {
        assert_eq!(TracerDirection::from_roll(0.0), TracerDirection::Up);
        assert_eq!(TracerDirection::from_roll(0.59), TracerDirection::Up);
        assert_eq!(TracerDirection::from_roll(0.61), TracerDirection::Left);
        assert_eq!(TracerDirection::from_roll(0.79), TracerDirection::Left);
        assert_eq!(TracerDirection::from_roll(0.81), TracerDirection::Right);
        assert_eq!(TracerDirection::from_roll(1.0), TracerDirection::Right);
    }

    #[test]
    fn test_tracer_direction_frequencies() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match TracerDirection::sample(&mut rng) {
                TracerDirection::Up => counts[0] += 1,
                TracerDirection::Left => counts[1] += 1,
                TracerDirection::Right => counts[2] += 1,
            }
        }
        assert!((5_500..6_500).contains(&counts[0]));
        assert!((1_500..2_500).contains(&counts[1]));
        assert!((1_500..2_500).contains(&counts[2]));
    }

    #[test]
    fn test_tracer_spawn_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let tracer = TracerStreak::new(&tuning, &mut rng);
            assert_eq!(tracer.pos.y, tuning.terrain_y());
            assert!((0.0..=tuning.screen_width).contains(&tracer.pos.x));
            assert!((-700.0..=-400.0).contains(&tracer.vel.y));
            match tracer.direction {
                TracerDirection::Up => assert_eq!(tracer.vel.x, 0.0),
                TracerDirection::Left => assert!((-80.0..=-50.0).contains(&tracer.vel.x)),
                TracerDirection::Right => assert!((50.0..=80.0).contains(&tracer.vel.x)),
            }
            assert!(tracer.color < TRACER_COLORS);
        }
    }

    #[test]
    fn test_tracer_expires_by_fade() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut tracer = TracerStreak::new(&tuning, &mut rng);
        tracer.pos.x = 600.0;
        tracer.update(0.3, &tuning);
        assert!(!tracer.is_expired(&tuning));
        tracer.update(0.31, &tuning);
        assert!(tracer.is_expired(&tuning));
    }

    #[test]
    fn test_tracer_off_screen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut tracer = TracerStreak::new(&tuning, &mut rng);
        tracer.pos = Vec2::new(600.0, -tracer.length - 1.0);
        assert!(tracer.off_screen(tuning.screen_width));
        tracer.pos = Vec2::new(-tracer.length - 1.0, 300.0);
        assert!(tracer.off_screen(tuning.screen_width));
        tracer.pos = Vec2::new(600.0, 300.0);
        assert!(!tracer.off_screen(tuning.screen_width));
    }
}
