//! Renderer-agnostic drawing
//!
//! The simulation never draws. Each frame `build_frame` turns a `GameState`
//! into a flat list of draw commands that a host renderer consumes through
//! the `RenderTarget` trait. Hosts that push triangles to a GPU can run the
//! list through `shapes::tessellate`; text is always left to the host.

pub mod palette;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use palette::Palette;
pub use scene::build_frame;
pub use vertex::Vertex;

use glam::Vec2;

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Text size classes (the host picks actual fonts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

/// Where a text position sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// One drawing primitive, screen coordinates (y grows down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole screen
    Clear(Color),
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Convex polygon
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    /// Thin oriented bar centred on `center`, long axis along `dir`
    Streak {
        center: Vec2,
        dir: Vec2,
        length: f32,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: TextSize,
        anchor: Anchor,
        color: Color,
    },
}

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    /// Text strings in draw order (handy for HUD checks)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Host-side consumer of finished frames
pub trait RenderTarget {
    fn submit(&mut self, frame: &Frame);
}

/// Discards frames but remembers the last one (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullTarget {
    pub frames: u64,
    pub last: Option<Frame>,
}

impl RenderTarget for NullTarget {
    fn submit(&mut self, frame: &Frame) {
        self.frames += 1;
        self.last = Some(frame.clone());
    }
}
