//! Plane spawn cadence
//!
//! Every `spawn_interval` seconds the spawner tops up the sky with a random
//! batch of planes, never letting the live count pass the pool capacity.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::plane::PlanePool;
use super::timer::Cooldown;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneSpawner {
    cooldown: Cooldown,
}

impl PlaneSpawner {
    /// First check after construction spawns right away
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            cooldown: Cooldown::new(tuning.spawn_interval),
        }
    }

    /// Run one spawn check at sim time `now`. Returns the slots filled.
    ///
    /// The interval restarts whenever it elapses, even if the sky is
    /// already full.
    pub fn update<R: Rng>(
        &mut self,
        now: f64,
        planes: &mut PlanePool,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Vec<usize> {
        if !self.cooldown.try_trigger(now) {
            return Vec::new();
        }

        let cap = planes.capacity().min(tuning.max_planes);
        let alive = planes.alive_count();
        if alive >= cap {
            return Vec::new();
        }

        let batch = rng.random_range(tuning.spawn_batch_min..=tuning.spawn_batch_max);
        let to_spawn = batch.min(cap - alive);
        let slots: Vec<usize> = (0..to_spawn)
            .filter_map(|_| planes.spawn(tuning, rng))
            .collect();
        if !slots.is_empty() {
            log::debug!("Spawned {} plane(s), {} alive", slots.len(), alive + slots.len());
        }
        slots
    }

    /// Make the next check spawn immediately (restart)
    pub fn reset(&mut self) {
        self.cooldown.reset();
    }
}
