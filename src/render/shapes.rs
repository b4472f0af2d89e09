//! Shape tessellation for 2D primitives
//!
//! Turns draw commands into triangle lists. Text commands produce nothing.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::{Color, DrawCmd, Frame};

/// Circle segments scale with radius, within these bounds
const MIN_SEGMENTS: u32 = 8;
const MAX_SEGMENTS: u32 = 48;

fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: Color) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
    vertices
}

/// Thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [from + perp, to + perp, to - perp, from - perp],
        color,
    );
    vertices
}

/// Oriented bar centred on `center`
pub fn streak(center: Vec2, dir: Vec2, length: f32, width: f32, color: Color) -> Vec<Vertex> {
    let half = dir.normalize_or_zero() * (length / 2.0);
    line(center - half, center + half, width, color)
}

/// Convex polygon as a triangle fan from the first point
pub fn polygon(points: &[Vec2], color: Color) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let origin = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(origin.x, origin.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Tessellate one command
pub fn command(cmd: &DrawCmd, frame_size: Vec2) -> Vec<Vertex> {
    match cmd {
        DrawCmd::Clear(color) => rect(Vec2::ZERO, frame_size, *color),
        DrawCmd::Rect { min, size, color } => rect(*min, *size, *color),
        DrawCmd::Circle {
            center,
            radius,
            color,
        } => circle(*center, *radius, *color, segments_for(*radius)),
        DrawCmd::Line {
            from,
            to,
            width,
            color,
        } => line(*from, *to, *width, *color),
        DrawCmd::Polygon { points, color } => polygon(points, *color),
        DrawCmd::Streak {
            center,
            dir,
            length,
            width,
            color,
        } => streak(*center, *dir, *length, *width, *color),
        DrawCmd::Text { .. } => Vec::new(),
    }
}

/// Tessellate a whole frame, preserving draw order
pub fn tessellate(frame: &Frame) -> Vec<Vertex> {
    let size = Vec2::new(frame.width, frame.height);
    frame
        .commands
        .iter()
        .flat_map(|cmd| command(cmd, size))
        .collect()
}
