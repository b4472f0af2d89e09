//! Platform abstraction layer
//!
//! Hosts plug into the game through three seams:
//! - `Clock`: frame delta and a monotonic timestamp
//! - `InputSource`: per-frame input, or `None` once the player quits
//! - `RenderTarget` (in `render`): consumes finished frames

pub mod game_loop;

pub use game_loop::GameLoop;

use std::collections::VecDeque;
use std::time::Instant;

use crate::sim::FrameInput;

/// Time source for the frame loop
pub trait Clock {
    /// Seconds since the previous call
    fn delta(&mut self) -> f32;
    /// Seconds since the clock started. Informational only (logging);
    /// gameplay timers run on the simulation clock.
    fn now(&self) -> f64;
}

/// Source of player input, polled once per frame
pub trait InputSource {
    /// Input for this frame. `None` means the player asked to quit.
    fn poll(&mut self) -> Option<FrameInput>;
}

/// Wall clock for native hosts
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that advances a fixed step per frame
#[derive(Debug, Clone)]
pub struct ManualClock {
    step: f32,
    elapsed: f64,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        Self { step, elapsed: 0.0 }
    }

    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }
}

impl Clock for ManualClock {
    fn delta(&mut self) -> f32 {
        self.elapsed += self.step as f64;
        self.step
    }

    fn now(&self) -> f64 {
        self.elapsed
    }
}

/// Replays a queue of inputs, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue `count` copies of `input`
    pub fn repeat(mut self, input: FrameInput, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, count));
        self
    }

    pub fn then(mut self, input: FrameInput) -> Self {
        self.frames.push_back(input);
        self
    }

    /// Frames left before quitting
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<FrameInput> {
        self.frames.pop_front()
    }
}
