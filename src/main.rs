//! Flak Cannon entry point
//!
//! Native headless runner: loads optional tuning overrides, plays a scripted
//! autoplay session through the frame loop and prints a JSON summary.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use flak_cannon::consts::SIM_DT;
use flak_cannon::platform::{GameLoop, ManualClock, ScriptedInput};
use flak_cannon::render::{NullTarget, shapes};
use flak_cannon::sim::{FrameInput, GameEvent, GameState};
use flak_cannon::{ConfigError, Tuning};

/// One minute of play at 60 fps
const AUTOPLAY_FRAMES: usize = 3600;
/// Frames spent sweeping the barrel in each direction
const SWEEP_FRAMES: usize = 45;
const FIRE_EVERY: usize = 12;
const NIGHT_AT: usize = 900;
const SUPER_POWER_AT: usize = 1500;

fn main() {
    env_logger::init();
    log::info!("Flak Cannon (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let state = GameState::with_tuning(seed, tuning);
    let mut game = GameLoop::new(
        state,
        ManualClock::new(SIM_DT),
        autoplay_script(AUTOPLAY_FRAMES),
        NullTarget::default(),
    );

    let (mut shots, mut kills, mut games) = (0u64, 0u64, 1u64);
    while game.frame() {
        for event in game.events() {
            match event {
                GameEvent::ShotFired => shots += 1,
                GameEvent::PlaneShot { .. } => kills += 1,
                GameEvent::Restarted => games += 1,
                _ => {}
            }
        }
    }

    let vertices = game
        .target()
        .last
        .as_ref()
        .map(|frame| shapes::tessellate(frame).len())
        .unwrap_or(0);
    let frames = game.frames();
    let (state, _) = game.into_parts();

    let summary = serde_json::json!({
        "seed": seed,
        "score": state.score,
        "hearts": state.hearts,
        "phase": state.phase,
        "frames": frames,
        "games": games,
        "shots": shots,
        "planes_shot": kills,
        "last_frame_vertices": vertices,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let tuning = Tuning::from_json(&text)?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

/// Sweep the barrel up and down, firing at a steady cadence, switch to
/// night and burn the power-up partway through, restart whenever the game
/// ends.
fn autoplay_script(frames: usize) -> ScriptedInput {
    ScriptedInput::new((0..frames).map(|i| {
        let rising = (i / SWEEP_FRAMES) % 2 == 0;
        FrameInput {
            fire: i % FIRE_EVERY == 0,
            toggle_night: i == NIGHT_AT,
            super_power: i == SUPER_POWER_AT,
            restart: i % 60 == 59,
            aim_up: rising,
            aim_down: !rising,
            power: Some(40.0 + (i % 120) as f32 / 2.0),
        }
    }))
}
