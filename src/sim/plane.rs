//! Enemy planes and their slot pool
//!
//! Planes are never freed. A plane shot down stays in its slot (dead) until
//! the spawner reuses the slot; a plane that slips past the left edge is
//! immediately re-entered on the right and costs the player a heart.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// An enemy plane flying right to left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    /// Top-left corner of the plane's bounding box
    pub pos: Vec2,
    /// Leftward speed in units/s
    pub speed: f32,
    pub alive: bool,
}

impl Plane {
    /// A live plane just past the right edge
    pub fn spawn<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut plane = Self {
            pos: Vec2::ZERO,
            speed: tuning.plane_speed,
            alive: true,
        };
        plane.respawn(tuning, rng);
        plane
    }

    /// Re-enter at a random point off the right edge, alive again
    pub fn respawn<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) {
        let (x_min, x_max) = tuning.respawn_x_range();
        let (y_min, y_max) = tuning.respawn_y_range();
        self.pos = Vec2::new(
            rng.random_range(x_min..=x_max),
            rng.random_range(y_min..=y_max),
        );
        self.alive = true;
    }

    /// Bounding rectangle used for hit tests
    pub fn bounds(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, Vec2::new(tuning.plane_width, tuning.plane_height))
    }

    /// Move left. Returns true when the plane escaped past the left edge
    /// this step (it has already been respawned on the right).
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        speed_multiplier: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        if !self.alive {
            return false;
        }
        self.pos.x -= self.speed * dt * speed_multiplier;
        if self.pos.x < -tuning.plane_width {
            self.respawn(tuning, rng);
            return true;
        }
        false
    }
}

/// Fixed-capacity arena of plane slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanePool {
    slots: Vec<Plane>,
    capacity: usize,
}

impl PlanePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of allocated slots (alive or dead)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|p| p.alive).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plane> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Plane> {
        self.slots.iter_mut()
    }

    pub fn get(&self, slot: usize) -> Option<&Plane> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Plane> {
        self.slots.get_mut(slot)
    }

    /// Bring a plane in: reuse the first dead slot, otherwise allocate a
    /// new one. Returns the slot, or None when every slot holds a live plane.
    pub fn spawn<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<usize> {
        if let Some(slot) = self.slots.iter().position(|p| !p.alive) {
            self.slots[slot].respawn(tuning, rng);
            return Some(slot);
        }
        if self.slots.len() < self.capacity {
            self.slots.push(Plane::spawn(tuning, rng));
            return Some(self.slots.len() - 1);
        }
        None
    }

    /// Advance every live plane. Returns the slots that escaped this step.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        speed_multiplier: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut escaped = Vec::new();
        for (slot, plane) in self.slots.iter_mut().enumerate() {
            if plane.update(dt, speed_multiplier, tuning, rng) {
                escaped.push(slot);
            }
        }
        escaped
    }

    /// Drop every slot (restart)
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn in_respawn_band(plane: &Plane, tuning: &Tuning) -> bool {
        let (x_min, x_max) = tuning.respawn_x_range();
        let (y_min, y_max) = tuning.respawn_y_range();
        (x_min..=x_max).contains(&plane.pos.x) && (y_min..=y_max).contains(&plane.pos.y)
    }

    #[test]
    fn test_spawn_enters_right_of_screen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let plane = Plane::spawn(&tuning, &mut rng);
            assert!(plane.alive);
            assert!(in_respawn_band(&plane, &tuning));
        }
    }

    #[test]
    fn test_slow_motion_scales_movement() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut normal = Plane::spawn(&tuning, &mut rng);
        let mut slowed = normal.clone();
        let x0 = normal.pos.x;

        normal.update(1.0, 1.0, &tuning, &mut rng);
        slowed.update(1.0, 0.3, &tuning, &mut rng);
        assert!((x0 - normal.pos.x - 120.0).abs() < 1e-3);
        assert!((x0 - slowed.pos.x - 36.0).abs() < 1e-3);
    }

    #[test]
    fn test_dead_plane_does_not_move() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut plane = Plane::spawn(&tuning, &mut rng);
        plane.alive = false;
        let before = plane.pos;
        assert!(!plane.update(100.0, 1.0, &tuning, &mut rng));
        assert_eq!(plane.pos, before);
    }

    #[test]
    fn test_pool_reuses_dead_slots() {
        let mut tuning = Tuning::default();
        tuning.max_planes = 2;
        let mut rng = Pcg32::seed_from_u64(11);
        let mut pool = PlanePool::new(tuning.max_planes);

        assert_eq!(pool.spawn(&tuning, &mut rng), Some(0));
        assert_eq!(pool.spawn(&tuning, &mut rng), Some(1));
        assert_eq!(pool.spawn(&tuning, &mut rng), None);

        pool.get_mut(1).unwrap().alive = false;
        assert_eq!(pool.alive_count(), 1);
        assert_eq!(pool.spawn(&tuning, &mut rng), Some(1));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.alive_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_escape_respawns_in_band_once(seed in any::<u64>(), start_x in -59.0f32..0.0, dt in 0.01f32..0.5) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut pool = PlanePool::new(tuning.max_planes);
            pool.spawn(&tuning, &mut rng);
            pool.get_mut(0).unwrap().pos.x = start_x;

            let mut escapes = 0;
            // Enough steps to cross the left edge exactly once, never enough
            // to also cross the full screen again
            let steps = (2.0 / dt).ceil() as usize;
            for _ in 0..steps {
                escapes += pool.update(dt, 1.0, &tuning, &mut rng).len();
            }

            prop_assert_eq!(escapes, 1);
            let plane = pool.get(0).unwrap();
            prop_assert!(plane.alive);
            prop_assert!(plane.pos.x <= tuning.screen_width + tuning.respawn_x_spread);
            prop_assert!(plane.pos.y >= 50.0 && plane.pos.y <= tuning.terrain_y() - 100.0);
        }

        #[test]
        fn prop_respawn_position_in_band(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut plane = Plane::spawn(&tuning, &mut rng);
            plane.pos.x = -61.0;
            plane.respawn(&tuning, &mut rng);
            prop_assert!(in_respawn_band(&plane, &tuning));
        }
    }
}
