//! Per-frame simulation tick
//!
//! Update order within one tick:
//! 1. advance the sim clock
//! 2. player actions (restart only, while game over)
//! 3. super power expiry
//! 4. plane spawning
//! 5. tracers, planes, shells
//! 6. shell/plane collisions
//! 7. explosions and smoke
//! 8. game over check

use super::collision::resolve_hits;
use super::effects::TracerStreak;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Fire the cannon (key-down)
    pub fire: bool,
    /// Toggle night mode (key-down)
    pub toggle_night: bool,
    /// Activate the slow-motion power-up (key-down)
    pub super_power: bool,
    /// Restart after game over (key-down)
    pub restart: bool,
    /// Raise the barrel (held)
    pub aim_up: bool,
    /// Lower the barrel (held)
    pub aim_down: bool,
    /// Power slider reading, if the host has one
    pub power: Option<f32>,
}

impl FrameInput {
    /// Drop the key-down actions, keeping held keys and the slider
    pub fn held_only(&self) -> Self {
        Self {
            aim_up: self.aim_up,
            aim_down: self.aim_down,
            power: self.power,
            ..Default::default()
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.events.clear();

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time += dt as f64;
    state.frame += 1;
    let now = state.time;

    match state.phase {
        GamePhase::Playing => apply_actions(state, input, now),
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
        }
    }

    if state.super_power.expire(now) {
        log::info!("Super power expired");
        state.events.push(GameEvent::SuperPowerEnded);
    }

    let playing = state.phase == GamePhase::Playing;

    if playing {
        state
            .spawner
            .update(now, &mut state.planes, &state.tuning, &mut state.rng);
    }

    // Background tracer fire (night only)
    if state.night.tracer_due(now) {
        let tracer = TracerStreak::new(&state.tuning, &mut state.rng);
        state.tracers.push(tracer);
    }
    state.tracers.update_and_prune(dt, &state.tuning);

    let multiplier = state.speed_multiplier();
    let escaped = state
        .planes
        .update(dt, multiplier, &state.tuning, &mut state.rng);
    if playing {
        for slot in escaped {
            state.lose_heart(slot);
        }
    }

    state.projectiles.update_and_prune(dt, &state.tuning);

    if playing {
        let hits = resolve_hits(
            &state.projectiles,
            &mut state.planes,
            &mut state.explosions,
            &mut state.score,
            &state.tuning,
        );
        for hit in hits {
            log::debug!("Plane {} shot down, score {}", hit.slot, state.score);
            state.events.push(GameEvent::PlaneShot { slot: hit.slot });
        }
    }

    state.explosions.update_and_prune(dt, &state.tuning);
    state.smoke.update_and_prune(dt, &state.tuning);

    if playing && state.hearts == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

/// Key-down actions and aiming (only while playing)
fn apply_actions(state: &mut GameState, input: &FrameInput, now: f64) {
    if input.fire {
        state.fire(now);
    }
    if input.toggle_night {
        state.toggle_night(now);
    }
    if input.super_power {
        state.activate_super_power(now);
    }

    let tuning = &state.tuning;
    if input.aim_down {
        state.aim.step(-1.0, tuning);
    }
    if input.aim_up {
        state.aim.step(1.0, tuning);
    }
    if let Some(power) = input.power {
        state.aim.set_power(power, tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::Plane;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn fire() -> FrameInput {
        FrameInput {
            fire: true,
            ..Default::default()
        }
    }

    /// A state with no spawning so tests control the sky
    fn quiet_state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.max_planes = 0;
        GameState::with_tuning(12345, tuning)
    }

    fn place_plane(state: &mut GameState, pos: Vec2) -> usize {
        state.planes = crate::sim::PlanePool::new(7);
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let slot = state.planes.spawn(&state.tuning, &mut rng).unwrap();
        let plane: &mut Plane = state.planes.get_mut(slot).unwrap();
        plane.pos = pos;
        slot
    }

    #[test]
    fn test_fire_scenario_until_shell_falls_out() {
        let mut tuning = Tuning::default();
        tuning.max_planes = 0;
        // Wide enough that the shell comes down through the bottom edge
        tuning.screen_width = 5000.0;
        let mut state = GameState::with_tuning(1, tuning);
        assert_eq!((state.hearts, state.score), (3, 0));
        assert_eq!((state.aim.angle, state.aim.power), (45.0, 50.0));

        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.smoke.len(), 8);

        let mut ticks = 0;
        loop {
            let last_y = state.projectiles.iter().next().map(|p| p.pos.y);
            tick(&mut state, &FrameInput::default(), SIM_DT);
            ticks += 1;
            if state.projectiles.is_empty() {
                // Removed on the tick it dropped below the screen
                assert!(last_y.is_some());
                break;
            }
            let shell = state.projectiles.iter().next().unwrap();
            assert!(shell.pos.y <= state.tuning.screen_height);
            assert!(ticks < 60 * 20, "shell never left the playfield");
        }
        assert!(state.projectiles.is_empty());
        assert!(state.smoke.is_empty());
    }

    #[test]
    fn test_shot_cooldown_via_ticks() {
        let mut state = quiet_state();
        tick(&mut state, &fire(), SIM_DT);
        // 0.1s later: rejected
        for _ in 0..5 {
            tick(&mut state, &FrameInput::default(), SIM_DT);
        }
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.projectiles.len(), 1);

        // Well past 0.2s since the first shot: accepted
        for _ in 0..10 {
            tick(&mut state, &FrameInput::default(), SIM_DT);
        }
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_aim_held_keys_step_per_tick() {
        let mut state = quiet_state();
        let up = FrameInput {
            aim_up: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &up, SIM_DT);
        }
        assert_eq!(state.aim.angle, 55.0);
        for _ in 0..100 {
            tick(&mut state, &up, SIM_DT);
        }
        assert_eq!(state.aim.angle, 90.0);

        let slider = FrameInput {
            power: Some(180.0),
            ..Default::default()
        };
        tick(&mut state, &slider, SIM_DT);
        assert_eq!(state.aim.power, 100.0);
    }

    #[test]
    fn test_hit_scores_ten() {
        let mut state = quiet_state();
        let slot = place_plane(&mut state, Vec2::new(100.0, 560.0));
        // Shell starts at the cannon (100, 620) and climbs into the plane box
        state.aim.angle = 90.0;
        state.aim.power = 100.0;
        state.planes.get_mut(slot).unwrap().speed = 0.0;

        let mut ticks = 0;
        while state.score == 0 && ticks < 60 {
            let input = if ticks == 0 { fire() } else { FrameInput::default() };
            tick(&mut state, &input, SIM_DT);
            ticks += 1;
        }

        assert_eq!(state.score, 10);
        assert!(!state.planes.get(slot).unwrap().alive);
        assert_eq!(state.explosions.len(), 1);
        assert!(state.events.contains(&GameEvent::PlaneShot { slot }));
        let shell = state.projectiles.iter().next().unwrap();
        let explosion = state.explosions.iter().next().unwrap();
        // Explosion was placed where the shell was when it hit
        assert!((explosion.pos.x - shell.pos.x).abs() < 1e-3);
    }

    #[test]
    fn test_escape_costs_exactly_one_heart() {
        let mut state = quiet_state();
        let slot = place_plane(&mut state, Vec2::new(-59.0, 200.0));
        tick(&mut state, &FrameInput::default(), SIM_DT);

        assert_eq!(state.hearts, 2);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::HeartLost { .. }))
                .count(),
            1
        );
        let plane = state.planes.get(slot).unwrap();
        assert!(plane.alive);
        assert!(plane.pos.x >= state.tuning.screen_width);

        // Next tick the plane is far away again: no more losses
        tick(&mut state, &FrameInput::default(), SIM_DT);
        assert_eq!(state.hearts, 2);
    }

    #[test]
    fn test_last_heart_ends_game_and_freezes_input() {
        let mut state = quiet_state();
        state.hearts = 1;
        place_plane(&mut state, Vec2::new(-59.0, 200.0));
        tick(&mut state, &FrameInput::default(), SIM_DT);

        assert_eq!(state.hearts, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        // Firing and aiming are ignored
        let angle = state.aim.angle;
        let input = FrameInput {
            fire: true,
            aim_up: true,
            super_power: true,
            toggle_night: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.aim.angle, angle);
        assert!(!state.super_power.used);
        assert!(!state.night.enabled);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Restart brings everything back
        let restart = FrameInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.hearts, 3);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.explosions.is_empty());
        assert!(state.smoke.is_empty());
        assert!(state.planes.is_empty());
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = quiet_state();
        state.score = 30;
        let restart = FrameInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_super_power_lasts_five_seconds() {
        let mut state = quiet_state();
        let activate = FrameInput {
            super_power: true,
            ..Default::default()
        };
        tick(&mut state, &activate, SIM_DT);
        let started = state.time;
        assert_eq!(state.speed_multiplier(), 0.3);

        let mut ended_at = None;
        for _ in 0..400 {
            tick(&mut state, &activate, SIM_DT);
            if state.events.contains(&GameEvent::SuperPowerEnded) {
                ended_at = Some(state.time);
                break;
            }
            assert_eq!(state.speed_multiplier(), 0.3);
        }

        let ended_at = ended_at.expect("super power never ended");
        assert!((ended_at - started - 5.0).abs() < SIM_DT as f64);
        assert_eq!(state.speed_multiplier(), 1.0);

        // Holding the key afterwards does not re-arm it
        for _ in 0..10 {
            tick(&mut state, &activate, SIM_DT);
        }
        assert_eq!(state.speed_multiplier(), 1.0);
        assert!(state.super_power.used);
    }

    #[test]
    fn test_tracers_only_at_night() {
        let mut state = quiet_state();
        for _ in 0..120 {
            tick(&mut state, &FrameInput::default(), SIM_DT);
        }
        assert!(state.tracers.is_empty());

        let night = FrameInput {
            toggle_night: true,
            ..Default::default()
        };
        tick(&mut state, &night, SIM_DT);
        assert!(state.night.enabled);
        assert_eq!(state.tracers.len(), 1);
    }

    #[test]
    fn test_spawner_fills_sky_over_time() {
        let mut state = GameState::new(777);
        tick(&mut state, &FrameInput::default(), SIM_DT);
        assert!(state.planes.alive_count() >= 1);
        for _ in 0..(60 * 30) {
            tick(&mut state, &FrameInput::default(), SIM_DT);
            assert!(state.planes.alive_count() <= 7);
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            FrameInput {
                aim_up: true,
                ..Default::default()
            },
            fire(),
            FrameInput {
                toggle_night: true,
                power: Some(80.0),
                ..Default::default()
            },
            FrameInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.hearts, state2.hearts);
        assert_eq!(state1.planes.len(), state2.planes.len());
        for (a, b) in state1.planes.iter().zip(state2.planes.iter()) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.tracers.len(), state2.tracers.len());
    }

    #[test]
    fn test_held_only_drops_key_downs() {
        let input = FrameInput {
            fire: true,
            restart: true,
            aim_up: true,
            power: Some(70.0),
            ..Default::default()
        };
        let held = input.held_only();
        assert!(!held.fire && !held.restart);
        assert!(held.aim_up);
        assert_eq!(held.power, Some(70.0));
    }
}
