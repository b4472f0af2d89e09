//! Time gates for repeated actions
//!
//! Both timers compare against the simulation clock (seconds since the run
//! started, advanced once per tick). Comparisons allow a tiny epsilon so an
//! interval that is an exact multiple of the tick length is not missed by
//! float accumulation error.

use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-6;

/// Minimum interval between accepted actions (shots, night toggles, spawns)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    interval: f32,
    /// Sim time of the last accepted action (None = never, always ready)
    last: Option<f64>,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether an action at `now` would be accepted
    pub fn ready(&self, now: f64) -> bool {
        match self.last {
            None => true,
            Some(last) => now - last + EPSILON >= self.interval as f64,
        }
    }

    /// Accept the action if ready, restarting the interval
    pub fn try_trigger(&mut self, now: f64) -> bool {
        if self.ready(now) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }

    /// Seconds since the last accepted action
    pub fn since_last(&self, now: f64) -> Option<f64> {
        self.last.map(|last| now - last)
    }

    /// Forget the last action (next request is accepted)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// A fixed-length window that starts on demand and ends on its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    duration: f32,
    started: Option<f64>,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    pub fn start(&mut self, now: f64) {
        self.started = Some(now);
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// True once the window has run its full duration
    pub fn expired(&self, now: f64) -> bool {
        match self.started {
            Some(start) => now - start + EPSILON >= self.duration as f64,
            None => false,
        }
    }

    /// Seconds left in the window (0 when stopped or expired)
    pub fn remaining(&self, now: f64) -> f32 {
        match self.started {
            Some(start) => (self.duration as f64 - (now - start)).max(0.0) as f32,
            None => 0.0,
        }
    }
}
