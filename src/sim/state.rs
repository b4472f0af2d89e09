//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives on `GameState`: hearts, score,
//! mode flags, timers and every entity collection.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collections::EntityList;
use super::effects::{Explosion, SmokePuff, TracerStreak};
use super::plane::PlanePool;
use super::projectile::Projectile;
use super::spawner::PlaneSpawner;
use super::timer::{Cooldown, Countdown};
use crate::clamp_angle;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Hearts ran out; only restart is accepted
    GameOver,
}

/// Something that happened during the last tick (for sound/UI hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    PlaneShot { slot: usize },
    HeartLost { slot: usize },
    SuperPowerStarted,
    SuperPowerEnded,
    NightModeChanged(bool),
    GameOver { score: u64 },
    Restarted,
}

/// Cannon elevation and muzzle power
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    /// Elevation in degrees above the horizon
    pub angle: f32,
    /// Muzzle speed as read from the power slider
    pub power: f32,
}

impl Aim {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            angle: clamp_angle(tuning.start_angle, tuning.min_angle, tuning.max_angle),
            power: tuning.start_power.clamp(tuning.min_power, tuning.max_power),
        }
    }

    /// Step the angle by `steps` increments (negative lowers), clamped
    pub fn step(&mut self, steps: f32, tuning: &Tuning) {
        self.angle = clamp_angle(
            self.angle + steps * tuning.angle_step,
            tuning.min_angle,
            tuning.max_angle,
        );
    }

    /// Take a slider reading; out-of-range values are clamped
    pub fn set_power(&mut self, power: f32, tuning: &Tuning) {
        self.power = if power.is_nan() {
            tuning.min_power
        } else {
            power.clamp(tuning.min_power, tuning.max_power)
        };
    }
}

/// Night palette toggle plus the background tracer cadence it drives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightMode {
    pub enabled: bool,
    toggle_cooldown: Cooldown,
    tracer_cooldown: Cooldown,
}

impl NightMode {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            enabled: false,
            toggle_cooldown: Cooldown::new(tuning.night_cooldown),
            tracer_cooldown: Cooldown::new(tuning.tracer_interval),
        }
    }

    /// Flip the mode unless it was flipped too recently
    pub fn try_toggle(&mut self, now: f64) -> bool {
        if self.toggle_cooldown.try_trigger(now) {
            self.enabled = !self.enabled;
            true
        } else {
            false
        }
    }

    /// Whether a tracer should be launched this tick
    pub fn tracer_due(&mut self, now: f64) -> bool {
        self.enabled && self.tracer_cooldown.try_trigger(now)
    }
}

/// Single-use slow-motion power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperPower {
    pub used: bool,
    window: Countdown,
}

impl SuperPower {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            used: false,
            window: Countdown::new(tuning.super_power_duration),
        }
    }

    pub fn active(&self) -> bool {
        self.window.is_running()
    }

    /// Start the power-up if it has not been used this game
    pub fn try_activate(&mut self, now: f64) -> bool {
        if self.used || self.active() {
            return false;
        }
        self.used = true;
        self.window.start(now);
        true
    }

    /// End the power-up once its window has run out. Returns true on the
    /// tick it ends.
    pub fn expire(&mut self, now: f64) -> bool {
        if self.window.expired(now) {
            self.window.stop();
            true
        } else {
            false
        }
    }

    pub fn remaining(&self, now: f64) -> f32 {
        self.window.remaining(now)
    }

    pub fn reset(&mut self) {
        self.used = false;
        self.window.stop();
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was started with
    pub tuning: Tuning,
    /// Generator position, saved so a restored game continues identically
    pub(crate) rng: Pcg32,
    /// Simulation clock (seconds)
    pub time: f64,
    /// Ticks since start
    pub frame: u64,
    pub phase: GamePhase,
    pub hearts: u32,
    pub score: u64,
    pub aim: Aim,
    pub night: NightMode,
    pub super_power: SuperPower,
    pub shot_cooldown: Cooldown,
    pub spawner: PlaneSpawner,
    pub projectiles: EntityList<Projectile>,
    pub explosions: EntityList<Explosion>,
    pub smoke: EntityList<SmokePuff>,
    pub tracers: EntityList<TracerStreak>,
    pub planes: PlanePool,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            frame: 0,
            phase: GamePhase::Playing,
            hearts: tuning.start_hearts,
            score: 0,
            aim: Aim::new(&tuning),
            night: NightMode::new(&tuning),
            super_power: SuperPower::new(&tuning),
            shot_cooldown: Cooldown::new(tuning.shot_cooldown),
            spawner: PlaneSpawner::new(&tuning),
            projectiles: EntityList::new(),
            explosions: EntityList::new(),
            smoke: EntityList::new(),
            tracers: EntityList::new(),
            planes: PlanePool::new(tuning.max_planes),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Plane speed multiplier (slowed while the super power runs)
    pub fn speed_multiplier(&self) -> f32 {
        if self.super_power.active() {
            self.tuning.slow_factor
        } else {
            1.0
        }
    }

    /// Fire a shell from the cannon if the shot cooldown allows.
    /// Each accepted shot also puffs a burst of muzzle smoke.
    pub fn fire(&mut self, now: f64) -> bool {
        if !self.shot_cooldown.try_trigger(now) {
            return false;
        }
        let origin = self.tuning.cannon_base();
        self.projectiles
            .push(Projectile::launch(origin, self.aim.angle, self.aim.power));
        self.smoke
            .extend(SmokePuff::burst(origin, &self.tuning, &mut self.rng));
        self.events.push(GameEvent::ShotFired);
        true
    }

    pub fn toggle_night(&mut self, now: f64) -> bool {
        if !self.night.try_toggle(now) {
            return false;
        }
        log::info!(
            "Night mode {}",
            if self.night.enabled { "on" } else { "off" }
        );
        self.events.push(GameEvent::NightModeChanged(self.night.enabled));
        true
    }

    pub fn activate_super_power(&mut self, now: f64) -> bool {
        if !self.super_power.try_activate(now) {
            return false;
        }
        log::info!(
            "Super power active for {}s",
            self.tuning.super_power_duration
        );
        self.events.push(GameEvent::SuperPowerStarted);
        true
    }

    /// Lose one heart (never below zero)
    pub fn lose_heart(&mut self, slot: usize) {
        self.hearts = self.hearts.saturating_sub(1);
        log::debug!("Plane {} got through, {} heart(s) left", slot, self.hearts);
        self.events.push(GameEvent::HeartLost { slot });
    }

    /// Start over: full hearts, zero score, empty sky. Night mode and aim
    /// carry over; the RNG keeps running.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.hearts = self.tuning.start_hearts;
        self.score = 0;
        self.projectiles.clear();
        self.explosions.clear();
        self.smoke.clear();
        self.tracers.clear();
        self.planes.clear();
        self.super_power.reset();
        self.shot_cooldown.reset();
        self.spawner.reset();
        log::info!("Game restarted");
        self.events.push(GameEvent::Restarted);
    }
}
