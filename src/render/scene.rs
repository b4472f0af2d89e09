//! Scene construction: GameState -> draw list

use glam::Vec2;

use super::palette::{Palette, colors, with_alpha};
use super::{Anchor, DrawCmd, Frame, TextSize};
use crate::consts::AIM_GUIDE_LENGTH;
use crate::elevation_dir;
use crate::sim::GameState;

/// Plane outline relative to its top-left corner (nose points left)
const PLANE_SHAPE: [Vec2; 4] = [
    Vec2::new(0.0, 15.0),
    Vec2::new(45.0, 0.0),
    Vec2::new(60.0, 15.0),
    Vec2::new(45.0, 30.0),
];

const TRAIL_DOT_RADIUS: f32 = 2.0;
const SHELL_RADIUS: f32 = 5.0;
const BARREL_WIDTH: f32 = 8.0;
const GUIDE_WIDTH: f32 = 2.0;
const TRACER_WIDTH: f32 = 2.0;
const HEART_RADIUS: f32 = 15.0;

/// Build the full frame for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let tuning = &state.tuning;
    let palette = Palette::for_mode(state.night.enabled);
    let mut frame = Frame::new(tuning.screen_width, tuning.screen_height);

    frame.push(DrawCmd::Clear(palette.sky));
    frame.push(DrawCmd::Rect {
        min: Vec2::new(0.0, tuning.terrain_y()),
        size: Vec2::new(tuning.screen_width, tuning.ground_height),
        color: palette.ground,
    });

    for tracer in state.tracers.iter() {
        let color = colors::TRACERS[tracer.color as usize % colors::TRACERS.len()];
        frame.push(DrawCmd::Streak {
            center: tracer.pos,
            dir: tracer.vel.normalize_or_zero(),
            length: tracer.length,
            width: TRACER_WIDTH,
            color: with_alpha(color, tracer.alpha),
        });
    }

    for plane in state.planes.iter().filter(|p| p.alive) {
        frame.push(DrawCmd::Polygon {
            points: PLANE_SHAPE.iter().map(|p| plane.pos + *p).collect(),
            color: palette.plane,
        });
    }

    if !state.is_game_over() {
        let base = tuning.cannon_base();
        let dir = elevation_dir(state.aim.angle);
        frame.push(DrawCmd::Line {
            from: base,
            to: base + dir * tuning.cannon_length,
            width: BARREL_WIDTH,
            color: palette.cannon,
        });
        frame.push(DrawCmd::Line {
            from: base,
            to: base + dir * AIM_GUIDE_LENGTH,
            width: GUIDE_WIDTH,
            color: colors::AIM_GUIDE,
        });
    }

    for shell in state.projectiles.iter() {
        for point in &shell.trail {
            frame.push(DrawCmd::Circle {
                center: *point,
                radius: TRAIL_DOT_RADIUS,
                color: palette.trail,
            });
        }
        frame.push(DrawCmd::Circle {
            center: shell.pos,
            radius: SHELL_RADIUS,
            color: colors::SHELL,
        });
    }

    for explosion in state.explosions.iter() {
        frame.push(DrawCmd::Circle {
            center: explosion.pos,
            radius: explosion.radius,
            color: with_alpha(colors::EXPLOSION, explosion.alpha(tuning)),
        });
    }

    for puff in state.smoke.iter() {
        frame.push(DrawCmd::Circle {
            center: puff.pos,
            radius: puff.radius,
            color: with_alpha(colors::SMOKE, puff.alpha),
        });
    }

    push_hud(&mut frame, state, &palette);

    if state.super_power.active() {
        let overlay = full_screen(&frame, colors::POWER_OVERLAY);
        frame.push(overlay);
    }

    if state.is_game_over() {
        push_game_over(&mut frame, state, &palette);
    }

    frame
}

fn full_screen(frame: &Frame, color: super::Color) -> DrawCmd {
    DrawCmd::Rect {
        min: Vec2::ZERO,
        size: Vec2::new(frame.width, frame.height),
        color,
    }
}

fn label(text: String, pos: Vec2, size: TextSize, anchor: Anchor, palette: &Palette) -> DrawCmd {
    DrawCmd::Text {
        text,
        pos,
        size,
        anchor,
        color: palette.label,
    }
}

/// Hearts, score, angle and power readouts
fn push_hud(frame: &mut Frame, state: &GameState, palette: &Palette) {
    for i in 0..state.hearts {
        frame.push(DrawCmd::Circle {
            center: Vec2::new(30.0 + i as f32 * 40.0, 30.0),
            radius: HEART_RADIUS,
            color: colors::HEART,
        });
    }

    let small = |text: String, x: f32, y: f32| {
        label(text, Vec2::new(x, y), TextSize::Small, Anchor::TopLeft, palette)
    };
    frame.push(small(format!("Score: {}", state.score), 30.0, 60.0));
    frame.push(small(format!("Angle: {}°", state.aim.angle as i32), 270.0, 35.0));
    frame.push(small(format!("Power: {}", state.aim.power as i32), 270.0, 85.0));

    if state.super_power.active() {
        let left = state.super_power.remaining(state.time).ceil() as i32;
        frame.push(small(format!("Slow-mo: {}s", left), 470.0, 35.0));
    }
}

/// Dimmed screen with the final score and restart hint
fn push_game_over(frame: &mut Frame, state: &GameState, palette: &Palette) {
    let overlay = full_screen(frame, colors::GAME_OVER_OVERLAY);
    frame.push(overlay);

    let center = Vec2::new(frame.width / 2.0, frame.height / 2.0);
    frame.push(label(
        "GAME OVER".to_string(),
        center + Vec2::new(0.0, -50.0),
        TextSize::Large,
        Anchor::Center,
        palette,
    ));
    frame.push(label(
        format!("Score: {}", state.score),
        center + Vec2::new(0.0, 20.0),
        TextSize::Large,
        Anchor::Center,
        palette,
    ));
    frame.push(label(
        "Press 'R' to Restart".to_string(),
        center + Vec2::new(0.0, 80.0),
        TextSize::Small,
        Anchor::Center,
        palette,
    ));
}
