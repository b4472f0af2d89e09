//! Fixed-step frame loop
//!
//! Frame deltas are capped, accumulated and consumed in `SIM_DT` ticks.
//! Key-down actions are latched until a tick actually runs, then applied to
//! that first substep only. Events from every substep of a frame are
//! collected into `frame_events` for the host.

use super::{Clock, InputSource};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::render::{RenderTarget, build_frame};
use crate::sim::{FrameInput, GameEvent, GamePhase, GameState, tick};

pub struct GameLoop<C, I, R> {
    pub state: GameState,
    clock: C,
    input: I,
    target: R,
    accumulator: f32,
    /// Input waiting for the next tick
    pending: FrameInput,
    frames: u64,
    last_phase: GamePhase,
    /// Events from all ticks run during the latest frame
    frame_events: Vec<GameEvent>,
}

impl<C: Clock, I: InputSource, R: RenderTarget> GameLoop<C, I, R> {
    pub fn new(state: GameState, clock: C, input: I, target: R) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            clock,
            input,
            target,
            accumulator: 0.0,
            pending: FrameInput::default(),
            frames: 0,
            last_phase,
            frame_events: Vec::new(),
        }
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Events produced during the latest frame, in tick order
    pub fn events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn into_parts(self) -> (GameState, R) {
        (self.state, self.target)
    }

    /// Run one frame. Returns false once the input source reports quit.
    pub fn frame(&mut self) -> bool {
        let Some(input) = self.input.poll() else {
            log::info!(
                "Quit requested after {} frames ({:.1}s)",
                self.frames,
                self.clock.now()
            );
            return false;
        };
        self.latch(input);
        self.frame_events.clear();

        let dt = self.clock.delta();
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.pending, SIM_DT);
            self.frame_events.extend_from_slice(&self.state.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot actions only apply once
            self.pending = self.pending.held_only();
        }
        if self.state.phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }

        let frame = build_frame(&self.state);
        self.target.submit(&frame);
        self.frames += 1;
        true
    }

    /// Run until quit. Returns the number of frames rendered.
    pub fn run(&mut self) -> u64 {
        while self.frame() {}
        self.frames
    }

    fn latch(&mut self, input: FrameInput) {
        let pending = &mut self.pending;
        pending.fire |= input.fire;
        pending.toggle_night |= input.toggle_night;
        pending.super_power |= input.super_power;
        pending.restart |= input.restart;
        pending.aim_up = input.aim_up;
        pending.aim_down = input.aim_down;
        pending.power = input.power;
    }
}
